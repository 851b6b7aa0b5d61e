use komik::models::{ImageSet, Quality, SeriesStatus, UNKNOWN_GROUP};

use super::*;

mod chapters;
mod series;
mod updates;

const SERIES: &str = "11111111-2222-3333-4444-555555555555";

/// The root cause behind any number of context wrappers.
fn cause(err: &KomikError) -> &KomikError { err.root_cause() }
