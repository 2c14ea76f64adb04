//! Jurisdiction metadata, organizations and districts.

use std::fmt;
use std::str::FromStr;

use crate::client::Client;
use crate::data::{Data, Record};
use crate::error::{Error, Result};
use crate::params::Params;
use crate::util::{jurisdiction_id, take_list};

/// 50 states plus DC and Puerto Rico.
pub const JURISDICTION_PAGE_SIZE: u32 = 52;

/// A legislative chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chamber {
    Upper,
    Lower,
}

impl Chamber {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chamber::Upper => "upper",
            Chamber::Lower => "lower",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chamber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "upper" => Ok(Chamber::Upper),
            "lower" => Ok(Chamber::Lower),
            _ => Err(Error::validation(format!(
                "Chamber must be \"upper\" or \"lower\", got {:?}",
                s
            ))),
        }
    }
}

fn include_param<'a>(include: &'a [&'a str]) -> Option<&'a [&'a str]> {
    if include.is_empty() { None } else { Some(include) }
}

impl Client {
    /// High-level metadata for every jurisdiction (one page of 52).
    pub fn list_jurisdictions(&self, include: &[&str]) -> Result<Vec<Data>> {
        let mut params = Params::new();
        params
            .set("include", include_param(include))
            .set("page", Some(1u32))
            .set("per_page", Some(JURISDICTION_PAGE_SIZE));
        let resp = self.get("jurisdictions", &params)?;
        take_list(resp, "results")
    }

    /// Detailed metadata for one state (`"NC"`) or full jurisdiction id.
    ///
    /// With `fields`, only those keys are returned; a requested key the
    /// jurisdiction lacks is an [`Error::Validation`].
    pub fn get_metadata(
        &self,
        state: &str,
        include: &[&str],
        fields: Option<&[&str]>,
    ) -> Result<Data> {
        let mut params = Params::new();
        params.set("include", include_param(include));
        let uri = format!("jurisdictions/{}", jurisdiction_id(state));
        let resp = self.get(&uri, &params)?;

        match fields {
            Some(fields) => select_fields(resp, fields),
            None => Ok(resp),
        }
    }

    /// The jurisdiction's organizations (chambers, legislature, executive).
    pub fn get_organizations(&self, state: &str) -> Result<Vec<Data>> {
        let uri = format!("jurisdictions/{}", jurisdiction_id(state));
        let params = Params::new().with("include", "organizations");
        let resp = self.get(&uri, &params)?;
        take_list(resp, "organizations")
    }

    /// Districts of one chamber. `chamber` is `"upper"` or `"lower"`, any case.
    ///
    /// The chamber is checked before any request is sent. Returns an empty
    /// list when the jurisdiction has no organization for that chamber.
    pub fn search_districts(&self, state: &str, chamber: &str) -> Result<Vec<Data>> {
        let chamber: Chamber = chamber.parse()?;
        let organizations = self.get_organizations(state)?;

        for mut org in organizations {
            if org["classification"].as_str() == Some(chamber.as_str()) {
                return Ok(org.take("districts").and_then(Data::into_array).unwrap_or_default());
            }
        }

        tracing::debug!("no {} chamber organization for {}", chamber, state);
        Ok(Vec::new())
    }
}

fn select_fields(resp: Data, fields: &[&str]) -> Result<Data> {
    let full = resp
        .into_object()
        .ok_or_else(|| Error::UnexpectedResponse("jurisdiction is not an object".to_string()))?;

    let mut selected = Record::new();
    for field in fields {
        let value = full
            .get(*field)
            .cloned()
            .ok_or_else(|| Error::validation(format!("unknown jurisdiction field {:?}", field)))?;
        selected.insert((*field).to_string(), value);
    }
    Ok(Data::Object(selected))
}
