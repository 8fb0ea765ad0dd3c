//! Board-agnostic core of the system metrics matrix: sample history,
//! value-to-height mapping and the shared data types.

pub mod buffer;
pub mod error;
pub mod geometry;
pub mod height;
pub mod metric;

pub use buffer::MetricBuffer;
pub use error::{MatrixError, Result};
pub use geometry::MatrixGeometry;
pub use height::value_to_height;
pub use metric::{MetricType, SystemStats};
