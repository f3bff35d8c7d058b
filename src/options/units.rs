use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::LengthUnit;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[schemars(title = "Units", inline)]
#[serde(default)]
/// Scene unit used when converting lengths to millimetres.
pub struct UnitOptions {
    /// Length of one scene unit.
    #[schemars(title = "Length Unit")]
    pub length: LengthUnit,
}
