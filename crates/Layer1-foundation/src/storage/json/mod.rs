mod store;

pub use store::{load_json, JsonStore, SASHIMONO_DIR};
