use store::AuthRole;

/// Landing page for a role's dashboard area. Buyers (and callers with no
/// role at hand) get the generic dashboard.
pub fn dashboard_path(role: Option<AuthRole>) -> &'static str {
    match role {
        Some(AuthRole::Seller) => "/dashboard/seller",
        Some(AuthRole::Admin) => "/dashboard/admin",
        Some(AuthRole::CustomerService) => "/dashboard/customer-service",
        _ => "/dashboard",
    }
}
