pub mod cargo;
pub mod settings;
pub mod vessels;

pub use cargo::CargoPage;
pub use settings::SettingsPage;
pub use vessels::VesselsPage;
