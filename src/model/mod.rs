pub use ophidia_core::{GenomeLogic, GenotypeLogic};
pub mod body {
    pub use ophidia_core::body::*;
}
pub mod brain {
    pub use ophidia_core::brain::*;
}
pub mod config {
    pub use ophidia_core::config::*;
}
pub mod controller {
    pub use ophidia_core::controller::*;
}
pub mod error {
    pub use ophidia_core::error::*;
}
pub mod evolution {
    pub use ophidia_core::evolution::*;
}
pub mod fruit {
    pub use ophidia_core::fruit::*;
}
pub mod grid {
    pub use ophidia_core::grid::*;
}
pub mod metrics {
    pub use ophidia_core::metrics::*;
}
pub mod sensing {
    pub use ophidia_core::sensing::*;
}
pub mod simulation {
    pub use ophidia_core::simulation::*;
}
pub mod stats {
    pub use ophidia_core::stats::*;
}
pub mod data {
    pub use ophidia_data::*;
}
pub mod persistence {
    pub use ophidia_io::*;
}
