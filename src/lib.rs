pub mod algorithms;
pub mod apply;
pub mod circuit;
pub mod codec;
pub mod complex;
pub mod config;
pub mod error;
pub mod gate;
pub mod index;
pub mod json;
pub mod layout;
pub mod measure;
pub mod operator;
pub mod register;
pub mod state;

pub use circuit::{Circuit, Operation};
pub use complex::{Complex64, ComplexExt};
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use gate::{CustomGate, Gate, GateKind};
pub use layout::{QubitId, QubitLayout};
pub use measure::MeasurementResult;
pub use operator::{embed, Operator};
pub use register::Register;
pub use state::StateVector;
