//=========================================================================
// Conference Companion: Library Root
//
// Runtime pieces of a venue navigation companion: a unified keyboard and
// touch movement input, a typed event bus for points of interest, and the
// view state a UI shell reads from.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose `core` (input, event bus, POI model, scenes) and `ui` state
// - Keep the winit integration (`platform`) hidden from users
//
// Typical usage:
// ```no_run
// use conference_companion::prelude::*;
//
// EngineBuilder::<MyScene>::new()
//     .build()
//     .init(|systems| { /* register scenes */ })
//     .run()?;
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod core;
pub mod prelude;
pub mod ui;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and the Winit event loop; `engine` wires it
// to the logic thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::core::platform_bridge::PlatformError;
pub use engine::{Engine, EngineBuilder};
