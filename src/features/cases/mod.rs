//! Case management feature for the staff interface.
//!
//! Investigators and admins work cases here: browse and filter the queue,
//! read full case detail, move cases through their lifecycle, assign
//! investigators, keep internal notes, and reply on the reporter thread.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/cases` | Staff | List cases with filters |
//! | GET | `/api/cases/{id}` | Staff | Full case detail with thread and audit trail |
//! | PATCH | `/api/cases/{id}/status` | Staff | Change case status |
//! | PATCH | `/api/cases/{id}/assign` | Staff | Assign an investigator |
//! | PATCH | `/api/cases/{id}/notes` | Staff | Update internal notes |
//! | POST | `/api/cases/{id}/messages` | Staff | Reply on the reporter thread |

pub mod dtos;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{CaseService, LifecycleService};
