use crate::data::Data;
use crate::error::{Error, Result};

pub(crate) const JURISDICTION_PREFIX: &str = "ocd-jurisdiction/";
pub(crate) const BILL_PREFIX: &str = "ocd-bill/";
pub(crate) const PERSON_PREFIX: &str = "ocd-person/";

/// Expands a state code into a full jurisdiction id, passing full ids through.
pub fn jurisdiction_id(state: &str) -> String {
    if state.starts_with(JURISDICTION_PREFIX) {
        return state.to_string();
    }
    format!(
        "{}country:us/state:{}/government",
        JURISDICTION_PREFIX,
        state.trim().to_lowercase()
    )
}

/// Prepends `prefix` unless `id` already carries it.
pub fn fix_id_string(prefix: &str, id: &str) -> String {
    if id.starts_with(prefix) {
        id.to_string()
    } else {
        format!("{}{}", prefix, id)
    }
}

pub(crate) fn join_path(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", root, path)
}

/// Pulls the list stored under `key` out of a response object.
pub(crate) fn take_list(mut data: Data, key: &str) -> Result<Vec<Data>> {
    data.take(key)
        .and_then(Data::into_array)
        .ok_or_else(|| Error::UnexpectedResponse(format!("missing `{}` list", key)))
}
