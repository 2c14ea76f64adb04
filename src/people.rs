use crate::client::Client;
use crate::data::Data;
use crate::error::{Error, Result};
use crate::params::Params;
use crate::util::{PERSON_PREFIX, fix_id_string, join_path, take_list};

const PEOPLE_PATH: &str = "people";
const PEOPLE_GEO_PATH: &str = "people.geo";

/// Filters for [`Client::search_legislators`]. Unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegislatorSearch {
    pub jurisdiction: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
    /// `upper`, `lower`, `legislature`, `executive`...
    pub org_classification: Option<String>,
    pub district: Option<String>,
    pub include: Vec<String>,
}

impl LegislatorSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = Some(jurisdiction.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn org_classification(mut self, classification: impl Into<String>) -> Self {
        self.org_classification = Some(classification.into());
        self
    }

    pub fn district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include.push(include.into());
        self
    }

    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .set("jurisdiction", self.jurisdiction.as_ref())
            .set("name", self.name.as_ref())
            .set("id", self.id.as_ref())
            .set("org_classification", self.org_classification.as_ref())
            .set("district", self.district.as_ref())
            .set(
                "include",
                (!self.include.is_empty()).then_some(self.include.as_slice()),
            );
        params
    }
}

impl Client {
    pub fn search_legislators(&self, search: &LegislatorSearch) -> Result<Vec<Data>> {
        let resp = self.get(PEOPLE_PATH, &search.params())?;
        take_list(resp, "results")
    }

    /// One legislator by Open States person id (`ocd-person/` optional).
    pub fn get_legislator(&self, id: &str) -> Result<Data> {
        let id = fix_id_string(PERSON_PREFIX, id);
        let params = Params::new().with("id", vec![id.clone()]);
        let resp = self.get(PEOPLE_PATH, &params)?;

        take_list(resp, "results")?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                url: format!("{}?id={}", join_path(self.root(), PEOPLE_PATH), id),
            })
    }

    /// Legislators whose districts contain the given point.
    pub fn locate_legislators(&self, lat: f64, lng: f64, include: &[&str]) -> Result<Vec<Data>> {
        let mut params = Params::new().with("lat", lat).with("lng", lng);
        params.set("include", (!include.is_empty()).then_some(include));
        let resp = self.get(PEOPLE_GEO_PATH, &params)?;
        take_list(resp, "results")
    }
}
