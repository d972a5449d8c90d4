//! Dataset loading: resolving resources, reading tables and images, encoding them.

pub mod encode;
pub mod images;
pub mod resources;
pub mod schema;
pub mod split;
pub mod table;

pub use encode::{FeatureEncoder, LabelEncoder, numeric_targets};
pub use images::LabeledImages;
pub use resources::ResourceBundle;
pub use schema::{ColumnType, SchemaDefinition};
pub use split::split_indices;
pub use table::DataTable;
