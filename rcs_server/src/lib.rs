//! # RCS server
//! This module hosts the HTTP surface of the Remote Consent Service. It is responsible for:
//! Validating the `consent_request` JWT handed over by the OAuth2 authorization server.
//! Presenting the decoded consent details for the authenticated user.
//! Recording the user's decision and signing the `consent_response` JWT for the redirect back.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/rcs/consent/details`: Resolves a `consent_request` JWT into the consent details DTO.
//! * `/api/rcs/consent/decision`: Records the user's authorise/reject decision and returns the redirect action.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod helpers;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
