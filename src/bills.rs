//! Bill search and lookup.

use std::thread;

use crate::client::Client;
use crate::data::Data;
use crate::error::{Error, Result};
use crate::params::Params;
use crate::util::{BILL_PREFIX, fix_id_string, take_list};

const BILLS_PATH: &str = "bills";

/// Page size used when fetching every page.
pub const ALL_PAGES_PER_PAGE: u32 = 20;

/// Filters and paging for [`Client::search_bills`].
///
/// Unset filters are not sent. The API rejects a search with no filters at
/// all; that surfaces as [`Error::Api`].
#[derive(Debug, Clone, PartialEq)]
pub struct BillSearch {
    pub jurisdiction: Option<String>,
    /// Alias for `jurisdiction`; setting both is an error.
    pub state: Option<String>,
    pub session: Option<String>,
    pub chamber: Option<String>,
    pub identifier: Vec<String>,
    pub classification: Option<String>,
    pub subject: Vec<String>,
    pub updated_since: Option<String>,
    pub created_since: Option<String>,
    pub action_since: Option<String>,
    pub sponsor: Option<String>,
    pub sponsor_classification: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub include: Vec<String>,

    pub page: u32,
    pub per_page: u32,
    /// Fetch every page (`per_page` fixed at 20), ignoring `page`/`per_page`.
    pub all_pages: bool,
}

impl Default for BillSearch {
    fn default() -> Self {
        Self {
            jurisdiction: None,
            state: None,
            session: None,
            chamber: None,
            identifier: Vec::new(),
            classification: None,
            subject: Vec::new(),
            updated_since: None,
            created_since: None,
            action_since: None,
            sponsor: None,
            sponsor_classification: None,
            q: None,
            sort: None,
            include: Vec::new(),
            page: 1,
            per_page: 10,
            all_pages: true,
        }
    }
}

impl BillSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = Some(jurisdiction.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn chamber(mut self, chamber: impl Into<String>) -> Self {
        self.chamber = Some(chamber.into());
        self
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier.push(identifier.into());
        self
    }

    pub fn classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject.push(subject.into());
        self
    }

    pub fn updated_since(mut self, since: impl Into<String>) -> Self {
        self.updated_since = Some(since.into());
        self
    }

    pub fn created_since(mut self, since: impl Into<String>) -> Self {
        self.created_since = Some(since.into());
        self
    }

    pub fn action_since(mut self, since: impl Into<String>) -> Self {
        self.action_since = Some(since.into());
        self
    }

    pub fn sponsor(mut self, sponsor: impl Into<String>) -> Self {
        self.sponsor = Some(sponsor.into());
        self
    }

    pub fn sponsor_classification(mut self, classification: impl Into<String>) -> Self {
        self.sponsor_classification = Some(classification.into());
        self
    }

    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include.push(include.into());
        self
    }

    /// Requests a single page instead of walking all of them.
    pub fn page(mut self, page: u32, per_page: u32) -> Self {
        self.page = page;
        self.per_page = per_page;
        self.all_pages = false;
        self
    }

    /// Filter parameters, without paging.
    fn filter_params(&self) -> Result<Params> {
        if self.state.is_some() && self.jurisdiction.is_some() {
            return Err(Error::validation(
                "cannot specify both jurisdiction and variant state",
            ));
        }

        let mut params = Params::new();
        params
            .set("jurisdiction", self.jurisdiction.as_ref().or(self.state.as_ref()))
            .set("session", self.session.as_ref())
            .set("chamber", self.chamber.as_ref())
            .set("identifier", non_empty(&self.identifier))
            .set("classification", self.classification.as_ref())
            .set("subject", non_empty(&self.subject))
            .set("updated_since", self.updated_since.as_ref())
            .set("created_since", self.created_since.as_ref())
            .set("action_since", self.action_since.as_ref())
            .set("sponsor", self.sponsor.as_ref())
            .set("sponsor_classification", self.sponsor_classification.as_ref())
            .set("q", self.q.as_ref())
            .set("sort", self.sort.as_ref())
            .set("include", non_empty(&self.include));
        Ok(params)
    }
}

fn non_empty(items: &[String]) -> Option<&[String]> {
    if items.is_empty() { None } else { Some(items) }
}

/// Paging metadata returned next to `results`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub max_page: u32,
    pub per_page: u32,
    pub total_items: u64,
}

impl Pagination {
    /// Reads the `pagination` object of a result page, if it has one.
    pub fn from_response(resp: &Data) -> Option<Self> {
        let p = resp.get("pagination")?;
        let page_number = |key: &str| p[key].as_u64().and_then(|n| u32::try_from(n).ok());
        Some(Self {
            page: page_number("page")?,
            max_page: page_number("max_page")?,
            per_page: page_number("per_page").unwrap_or(0),
            total_items: p["total_items"].as_u64().unwrap_or(0),
        })
    }

    pub fn has_more(&self) -> bool {
        self.page < self.max_page
    }
}

/// Identifies one bill: by Open States id, or by state, session and bill id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillLookup {
    pub uid: Option<String>,
    pub state: Option<String>,
    pub session: Option<String>,
    pub bill_id: Option<String>,
    pub include: Vec<String>,
}

impl BillLookup {
    pub fn uid(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Default::default()
        }
    }

    pub fn by_identifier(
        state: impl Into<String>,
        session: impl Into<String>,
        bill_id: impl Into<String>,
    ) -> Self {
        Self {
            state: Some(state.into()),
            session: Some(session.into()),
            bill_id: Some(bill_id.into()),
            ..Default::default()
        }
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include.push(include.into());
        self
    }

    fn path(&self) -> Result<String> {
        let given = |v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };
        let (uid, state, session, bill_id) = (
            given(&self.uid),
            given(&self.state),
            given(&self.session),
            given(&self.bill_id),
        );

        match (uid, state, session, bill_id) {
            (Some(uid), None, None, None) => {
                Ok(format!("{}/{}", BILLS_PATH, fix_id_string(BILL_PREFIX, &uid)))
            }
            (None, Some(state), Some(session), Some(bill_id)) => Ok(format!(
                "{}/{}/{}/{}",
                BILLS_PATH,
                state.to_lowercase(),
                session,
                bill_id
            )),
            _ => Err(Error::validation(
                "Must specify an Open States bill (uid), or the state, session, and bill ID",
            )),
        }
    }
}

impl Client {
    /// Finds bills matching `search`.
    ///
    /// In all-pages mode pages are fetched one at a time with the client's
    /// page delay in between, until the reported `page` reaches `max_page`.
    /// A 404 on a later page ends the walk and keeps what was collected.
    pub fn search_bills(&self, search: &BillSearch) -> Result<Vec<Data>> {
        let mut params = search.filter_params()?;

        let (mut page, per_page) = if search.all_pages {
            (1, ALL_PAGES_PER_PAGE)
        } else {
            (search.page, search.per_page)
        };
        params.set("per_page", Some(per_page)).set("page", Some(page));

        let resp = self.get(BILLS_PATH, &params)?;
        let mut pagination = Pagination::from_response(&resp);
        let mut results = take_list(resp, "results")?;

        if !search.all_pages {
            return Ok(results);
        }

        while let Some(current) = pagination.filter(Pagination::has_more) {
            page += 1;
            thread::sleep(self.page_delay());
            tracing::debug!("fetching bill page {} of {}", page, current.max_page);
            params.set("page", Some(page));

            let resp = match self.get(BILLS_PATH, &params) {
                Ok(resp) => resp,
                Err(e) if e.is_not_found() => {
                    tracing::debug!("bill page {} not found, stopping", page);
                    break;
                }
                Err(e) => return Err(e),
            };
            pagination = Pagination::from_response(&resp);
            results.extend(take_list(resp, "results")?);
        }

        Ok(results)
    }

    /// Details of one bill.
    pub fn get_bill(&self, lookup: &BillLookup) -> Result<Data> {
        let path = lookup.path()?;
        let mut params = Params::new();
        params.set("include", non_empty(&lookup.include));
        self.get(&path, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;
    use serde_json::json;

    #[test]
    fn uid_alone_is_prefixed() {
        assert_eq!(
            BillLookup::uid("f0049138-1ad8-4506-a2a4-f4dd1251bbba").path().unwrap(),
            "bills/ocd-bill/f0049138-1ad8-4506-a2a4-f4dd1251bbba"
        );
        assert_eq!(
            BillLookup::uid("ocd-bill/abc").path().unwrap(),
            "bills/ocd-bill/abc"
        );
    }

    #[test]
    fn triple_lowercases_state() {
        let lookup = BillLookup::by_identifier("NC", "2019", "HB 1");
        assert_eq!(lookup.path().unwrap(), "bills/nc/2019/HB 1");
    }

    #[test]
    fn uid_with_any_triple_part_is_rejected() {
        for lookup in [
            BillLookup {
                state: Some("nc".into()),
                ..BillLookup::uid("abc")
            },
            BillLookup {
                session: Some("2019".into()),
                ..BillLookup::uid("abc")
            },
            BillLookup {
                bill_id: Some("HB 1".into()),
                ..BillLookup::uid("abc")
            },
        ] {
            assert!(matches!(lookup.path(), Err(Error::Validation(_))));
        }
    }

    #[test]
    fn incomplete_triple_is_rejected() {
        let lookup = BillLookup {
            state: Some("nc".into()),
            session: Some("2019".into()),
            ..Default::default()
        };
        assert!(matches!(lookup.path(), Err(Error::Validation(_))));
        assert!(matches!(BillLookup::default().path(), Err(Error::Validation(_))));
    }

    #[test]
    fn state_and_jurisdiction_conflict() {
        let search = BillSearch::new().state("nc").jurisdiction("North Carolina");
        assert!(matches!(search.filter_params(), Err(Error::Validation(_))));
    }

    #[test]
    fn filter_params_skip_unset_and_join_lists() {
        let params = BillSearch::new()
            .state("nc")
            .session("2021")
            .subject("Education")
            .subject("Taxation")
            .include("sponsorships")
            .filter_params()
            .unwrap();
        assert_eq!(
            params.get("jurisdiction"),
            Some(&ParamValue::Scalar("nc".to_string()))
        );
        assert_eq!(
            params.to_query(),
            vec![
                ("jurisdiction".to_string(), "nc".to_string()),
                ("session".to_string(), "2021".to_string()),
                ("subject".to_string(), "Education,Taxation".to_string()),
                ("include".to_string(), "sponsorships".to_string()),
            ]
        );
    }

    #[test]
    fn empty_search_sends_no_filters() {
        assert!(BillSearch::new().filter_params().unwrap().is_empty());
    }

    #[test]
    fn pagination_reads_metadata() {
        let resp = Data::from(json!({
            "results": [],
            "pagination": {"per_page": 20, "page": 2, "max_page": 3, "total_items": 47}
        }));
        let p = Pagination::from_response(&resp).unwrap();
        assert_eq!(p.page, 2);
        assert_eq!(p.max_page, 3);
        assert_eq!(p.total_items, 47);
        assert!(p.has_more());

        let last = Data::from(json!({"pagination": {"page": 3, "max_page": 3}}));
        assert!(!Pagination::from_response(&last).unwrap().has_more());
        assert!(Pagination::from_response(&Data::from(json!({"results": []}))).is_none());
    }
}
