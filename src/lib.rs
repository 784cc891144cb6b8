//! DSCPL: a retrieval-grounded spiritual guide with a guided session flow.

// Interdiction des pratiques dangereuses
#![deny(unsafe_code)] // Le code unsafe est interdit
#![warn(missing_docs)] // Toute API publique doit être documentée
#![deny(unused_must_use)] // Oblige à gérer explicitement les Result et Option
#![deny(nonstandard_style)] // Empêche tout style de code non standard
#![deny(overflowing_literals)] // Interdit les littéraux qui débordent

// Clippy pour stricte discipline
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::unwrap_used)] // Interdit unwrap()
#![warn(clippy::expect_used)] // Interdit expect()
#![warn(clippy::panic)] // Interdit panic!()
#![warn(clippy::print_stdout)] // Interdit println!() en production
#![warn(clippy::todo)]
#![warn(clippy::unimplemented)]
#![warn(clippy::redundant_clone)]
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

/// Corpus indexing, retrieval, memory, generation and the session flow.
pub mod guide;
/// HTTP server and API routes.
#[allow(clippy::missing_errors_doc)]
pub mod server;
/// Entry helpers to start the guide server.
pub mod start_dscpl_guide;
