//! Public tracking feature for anonymous reporters.
//!
//! A reporter submits a tip and walks away with a case ID and an access
//! code. From then on those two values are the whole relationship: the
//! service holds no account, session, or contact channel for them. This
//! feature is the public surface where that exchange happens.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/reports` | No | Submit a new report, returns the one-time receipt |
//! | POST | `/api/track` | No | Look up a case with its credentials |
//! | POST | `/api/track/messages` | No | Send a message to the investigators |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::TrackingService;
