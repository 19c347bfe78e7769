//! Capability guards
//!
//! Every console route carries a [`Policy`] in one table. Commands are
//! checked against the session's permissions before any request is sent.
//! `all` grants everything; `module:*` grants every action of a module.

use std::fmt;

use hub_client::{Session, UserInfo};
use shared::error::{AppError, AppResult};

// === Permissions ===
pub const DISCOUNTS_READ: &str = "discounts:read";
pub const DISCOUNTS_WRITE: &str = "discounts:write";
pub const DISCOUNTS_DELETE: &str = "discounts:delete";
pub const DISCOUNTS_CALCULATE: &str = "discounts:calculate";
pub const DEALERS_READ: &str = "dealers:read";
pub const DEALERS_MANAGE_USERS: &str = "dealers:manage_users";
pub const PRODUCTS_READ: &str = "products:read";
pub const ROLES_READ: &str = "roles:read";

/// Assignable permissions
pub const ALL_PERMISSIONS: &[&str] = &[
    DISCOUNTS_READ,
    DISCOUNTS_WRITE,
    DISCOUNTS_DELETE,
    DISCOUNTS_CALCULATE,
    DEALERS_READ,
    DEALERS_MANAGE_USERS,
    PRODUCTS_READ,
    ROLES_READ,
];

/// Access rule for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// No session needed
    Public,
    Required(&'static str),
    AnyOf(&'static [&'static str]),
    AllOf(&'static [&'static str]),
}

impl Policy {
    /// Whether `user` satisfies this policy
    pub fn allows(&self, user: Option<&UserInfo>) -> bool {
        let held = |action: &str| user.is_some_and(|u| u.can(action));
        match self {
            Policy::Public => true,
            Policy::Required(action) => held(*action),
            Policy::AnyOf(actions) => actions.iter().any(|a| held(*a)),
            Policy::AllOf(actions) => actions.iter().all(|a| held(*a)),
        }
    }
}

/// Console routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    DiscountList,
    DiscountSearch,
    DealerDiscounts,
    ProductDiscounts,
    ExpiredDiscounts,
    UpcomingDiscounts,
    DiscountDetail,
    DiscountCreate,
    DiscountEdit,
    DiscountDelete,
    DiscountRestore,
    DiscountCalculate,
    DealerDetail,
    DealerUserDelete,
    ProductDetail,
    RoleList,
    Session,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Route::DiscountList => "discount list",
            Route::DiscountSearch => "discount search",
            Route::DealerDiscounts => "dealer discounts",
            Route::ProductDiscounts => "product discounts",
            Route::ExpiredDiscounts => "expired discounts",
            Route::UpcomingDiscounts => "upcoming discounts",
            Route::DiscountDetail => "discount detail",
            Route::DiscountCreate => "create discount",
            Route::DiscountEdit => "edit discount",
            Route::DiscountDelete => "delete discount",
            Route::DiscountRestore => "restore discount",
            Route::DiscountCalculate => "discount calculation",
            Route::DealerDetail => "dealer detail",
            Route::DealerUserDelete => "delete dealer user",
            Route::ProductDetail => "product detail",
            Route::RoleList => "role list",
            Route::Session => "session",
        };
        f.write_str(name)
    }
}

/// Route policy table
pub const ROUTE_POLICIES: &[(Route, Policy)] = &[
    (Route::DiscountList, Policy::Required(DISCOUNTS_READ)),
    (Route::DiscountSearch, Policy::Required(DISCOUNTS_READ)),
    (
        Route::DealerDiscounts,
        Policy::AllOf(&[DISCOUNTS_READ, DEALERS_READ]),
    ),
    (
        Route::ProductDiscounts,
        Policy::AllOf(&[DISCOUNTS_READ, PRODUCTS_READ]),
    ),
    (Route::ExpiredDiscounts, Policy::Required(DISCOUNTS_READ)),
    (Route::UpcomingDiscounts, Policy::Required(DISCOUNTS_READ)),
    (Route::DiscountDetail, Policy::Required(DISCOUNTS_READ)),
    (Route::DiscountCreate, Policy::Required(DISCOUNTS_WRITE)),
    (Route::DiscountEdit, Policy::Required(DISCOUNTS_WRITE)),
    (
        Route::DiscountDelete,
        Policy::AnyOf(&[DISCOUNTS_DELETE, DISCOUNTS_WRITE]),
    ),
    (
        Route::DiscountRestore,
        Policy::AnyOf(&[DISCOUNTS_DELETE, DISCOUNTS_WRITE]),
    ),
    (
        Route::DiscountCalculate,
        Policy::AnyOf(&[DISCOUNTS_CALCULATE, DISCOUNTS_READ]),
    ),
    (Route::DealerDetail, Policy::Required(DEALERS_READ)),
    (
        Route::DealerUserDelete,
        Policy::Required(DEALERS_MANAGE_USERS),
    ),
    (Route::ProductDetail, Policy::Required(PRODUCTS_READ)),
    (Route::RoleList, Policy::Required(ROLES_READ)),
    (Route::Session, Policy::Public),
];

/// Policy for `route`; unlisted routes need the `all` permission
pub fn policy_for(route: Route) -> Policy {
    ROUTE_POLICIES
        .iter()
        .find(|(r, _)| *r == route)
        .map(|(_, policy)| *policy)
        .unwrap_or(Policy::Required("all"))
}

/// Check `route` against the session
pub fn authorize(route: Route, session: &Session) -> AppResult<()> {
    let policy = policy_for(route);
    if policy == Policy::Public {
        return Ok(());
    }
    if !session.is_authenticated() {
        return Err(AppError::not_authenticated());
    }
    if !policy.allows(session.user()) {
        tracing::debug!(%route, ?policy, "Route denied");
        return Err(AppError::permission_denied(format!(
            "You do not have permission to open the {}",
            route
        ))
        .with_detail("route", route.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(perms: &[&str]) -> Session {
        let mut session = Session::default();
        session.set_token(Some("jwt".into()));
        session.set_user(Some(UserInfo {
            id: "1".into(),
            username: "ops".into(),
            role: "manager".into(),
            permissions: perms.iter().map(|p| p.to_string()).collect(),
        }));
        session
    }

    #[test]
    fn test_every_route_has_a_policy() {
        let routes = [
            Route::DiscountList,
            Route::DiscountSearch,
            Route::DealerDiscounts,
            Route::ProductDiscounts,
            Route::ExpiredDiscounts,
            Route::UpcomingDiscounts,
            Route::DiscountDetail,
            Route::DiscountCreate,
            Route::DiscountEdit,
            Route::DiscountDelete,
            Route::DiscountRestore,
            Route::DiscountCalculate,
            Route::DealerDetail,
            Route::DealerUserDelete,
            Route::ProductDetail,
            Route::RoleList,
            Route::Session,
        ];
        for route in routes {
            assert!(
                ROUTE_POLICIES.iter().any(|(r, _)| *r == route),
                "missing policy for {route}"
            );
        }
    }

    #[test]
    fn test_permissions_are_assignable() {
        for (_, policy) in ROUTE_POLICIES {
            let actions: &[&str] = match policy {
                Policy::Public => &[],
                Policy::Required(a) => std::slice::from_ref(a),
                Policy::AnyOf(a) | Policy::AllOf(a) => *a,
            };
            for action in actions {
                assert!(ALL_PERMISSIONS.contains(action), "{action} not assignable");
            }
        }
    }

    #[test]
    fn test_public_route_needs_no_session() {
        assert!(authorize(Route::Session, &Session::default()).is_ok());
    }

    #[test]
    fn test_signed_out_is_not_authenticated() {
        let err = authorize(Route::DiscountList, &Session::default()).unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_all_of_needs_every_permission() {
        assert!(authorize(Route::DealerDiscounts, &session(&[DISCOUNTS_READ])).is_err());
        assert!(
            authorize(
                Route::DealerDiscounts,
                &session(&[DISCOUNTS_READ, DEALERS_READ])
            )
            .is_ok()
        );
    }

    #[test]
    fn test_any_of_and_wildcards() {
        assert!(authorize(Route::DiscountRestore, &session(&[DISCOUNTS_WRITE])).is_ok());
        assert!(authorize(Route::DiscountRestore, &session(&["discounts:*"])).is_ok());
        assert!(authorize(Route::DealerUserDelete, &session(&["discounts:*"])).is_err());
        assert!(authorize(Route::DealerUserDelete, &session(&["all"])).is_ok());
    }

    #[test]
    fn test_denial_names_the_route() {
        let err = authorize(Route::RoleList, &session(&[DISCOUNTS_READ])).unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::PermissionDenied);
        assert_eq!(err.message, "You do not have permission to open the role list");
    }
}
