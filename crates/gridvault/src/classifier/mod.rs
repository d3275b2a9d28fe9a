pub mod matcher;

pub use matcher::{
    infer_granularity, Classification, EnergyKind, FilenameClassifier, Granularity,
};
