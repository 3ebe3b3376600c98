//! Sala Core - DSP primitives for the sala reverb
//!
//! This crate provides the building blocks the reverb engine is assembled from,
//! designed for real-time audio processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for block-based, multichannel effects
//! - [`ProcessSpec`] - Stream configuration handed to [`Effect::prepare`]
//! - [`AudioBlock`] - Borrowed per-channel buffers for one processing quantum
//!
//! ## Parameter Smoothing
//!
//! - [`LinearSmoothedParam`] - Linear ramps (constant rate), used for gains and
//!   filter coefficients that must not click when automated
//!
//! ## Reverb Building Blocks
//!
//! - [`CombFilter`] - Feedback comb with one-pole damping in the loop
//! - [`AllpassFilter`] - Schroeder allpass for diffusion
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`], [`ParamId`], [`ParamFlags`], [`ParamUnit`] - metadata
//!   for host automation and display
//! - [`AtomicF32`] - lock-free scalar cell for cross-thread parameter values
//!
//! # no_std Support
//!
//! The whole crate works without `std`; buffers and descriptor text use
//! `alloc`. The `std` feature is on by default and adds nothing yet.
//!
//! ```toml
//! [dependencies]
//! sala-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **Object-safe traits**: `dyn Effect` works when static dispatch doesn't fit
//! - **Prepare, then process**: buffers are sized in `prepare()`, never in `process()`

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod allpass;
pub mod atomic;
pub mod block;
pub mod comb;
pub mod effect;
pub mod math;
pub mod param;
pub mod param_info;

pub use allpass::AllpassFilter;
pub use atomic::AtomicF32;
pub use block::{AudioBlock, ProcessSpec};
pub use comb::CombFilter;
pub use effect::Effect;
pub use math::{flush_denormal, linear_to_db, peak, rms};
pub use param::LinearSmoothedParam;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit};
