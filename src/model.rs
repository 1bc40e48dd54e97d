mod features;
mod linear;
mod store;

pub use self::{
    features::{FEATURE_COUNT, FeatureEncoder, FeatureVector, Scaler},
    linear::{CostModel, LinearModel},
    store::ModelFile,
};
