//! Geometry interchange.
//! Adds WKT import and export of finished features.
use crate::*;
use std::error::Error;

pub mod wkt;

type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;
