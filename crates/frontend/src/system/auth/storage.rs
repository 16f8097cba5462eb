//! Session values persisted by the POS login screen.

use super::context::SelectedLocation;
use log::warn;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const SELECTED_LOCATION_KEY: &str = "selected_location";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

/// Location chosen on the login screen, stored as JSON
pub fn get_selected_location() -> Option<SelectedLocation> {
    let raw = get_local_storage()?.get_item(SELECTED_LOCATION_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(location) => Some(location),
        Err(e) => {
            warn!("ignoring unreadable stored location: {}", e);
            None
        }
    }
}
