//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_service;
mod role_admin_service;
mod role_ports;

pub use audit_ports::{AuditEvent, AuditRepository};
pub use authorization_service::AuthorizationService;
pub use role_admin_service::RoleAdminService;
pub use role_ports::{RoleAssignmentRecord, RoleAssignmentRepository, RoleChangeInput};
