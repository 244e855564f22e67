use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(RequestId);

/// The two computation engines compared by the benchmark endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    Vedic,
    Numpy,
}

impl Engine {
    pub const ALL: [Engine; 2] = [Engine::Vedic, Engine::Numpy];

    /// Field name used for this engine's timing in a benchmark record.
    pub fn data_key(self) -> &'static str {
        match self {
            Engine::Vedic => "vedic",
            Engine::Numpy => "numpy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Engine::Vedic => "Vedic Engine",
            Engine::Numpy => "NumPy Baseline",
        }
    }
}
