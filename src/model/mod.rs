//! Display models: flattened views of API resources, ready to render.

mod app;
mod beta_group;
mod beta_tester;
mod build;
mod bundle_id;
mod certificate;
mod device;
mod pre_release_version;

pub use app::App;
pub use beta_group::BetaGroup;
pub use beta_tester::BetaTester;
pub use build::Build;
pub use bundle_id::BundleId;
pub use certificate::Certificate;
pub use device::Device;
pub use pre_release_version::PreReleaseVersion;
