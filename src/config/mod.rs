// ABOUTME: Configuration management module
// ABOUTME: Re-exports the environment-based server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration management for the meal plan server
//!
//! Configuration is environment-only: no config files, no persistence.

pub mod environment;

pub use environment::ServerConfig;
