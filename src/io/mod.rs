//! File collaborators: coordinate loading and tour output.

mod reader;
mod writer;

pub use reader::{parse_points, parse_record, read_points, LoadReport, MalformedRecord};
pub use writer::{write_report, write_tour, write_tour_file, TourReport};
