//! Shared utilities and error types for the staking pool contracts.
//!
//! This crate provides:
//! - [`CommonError`]: error codes returned by the shared modules.
//! - [`authority`]: the single designated authority and its two-step handoff.
//! - [`reentrancy`]: the contract-wide mutual-exclusion guard.
//!
//! Contracts convert [`CommonError`] into their own error enums at the call
//! site.

#![cfg_attr(not(feature = "std"), no_std)]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod authority;
pub mod reentrancy;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every contract in the workspace.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 1 – 9   | Lifecycle / initialisation    |
/// | 10 – 19 | Authentication & authorisation|
/// | 20 – 29 | Resource not found            |
/// | 40 – 49 | Contract state                |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    /// The contract has not been initialised yet.
    NotInitialized = 1,

    /// The contract has already been initialised.
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller is not the designated authority (or, on accept, not the
    /// proposed one).
    AccessDenied = 10,

    // ── Not-found (20–29) ────────────────────────────────────
    /// An authority handoff was accepted or cancelled with none pending.
    NoPendingTransfer = 20,

    // ── Contract state (40–49) ───────────────────────────────
    /// A guarded entry point was invoked while another one is in progress.
    Reentrant = 40,
}
