//! Multilingual IVR engine that collects structured job-applicant data
//! (name, age, phone number, address, expected pay) over a turn-based
//! voice dialogue, confirming each answer before advancing.
//!
//! The crate is split between the dialogue core — the only place with
//! real branching logic — and the collaborator seams it talks to:
//! speech transcription/synthesis, completed-record storage, and
//! employer accounts. The HTTP routers live next to the domain modules
//! so the `services/api` binary only wires infrastructure.

pub mod applicants;
pub mod config;
pub mod dialogue;
pub mod employers;
pub mod error;
pub mod telemetry;
