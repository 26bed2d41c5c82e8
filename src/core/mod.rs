pub mod etl;
pub mod location_cache;
pub mod pipeline;
pub mod resolver;

pub use crate::domain::model::{MusicianRecord, RosterEntry, RunReport};
pub use crate::domain::ports::{ConfigProvider, Geocoder, Pipeline, ProfileSource, Storage};
pub use crate::utils::error::Result;
