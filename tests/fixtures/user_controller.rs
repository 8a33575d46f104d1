use gin_plus::{ioc, mvc};

use crate::service::UserService;

/// Users of the application.
/// @BasePath("/users")
#[derive(Default)]
pub struct UserCtrl {
    _ctrl: mvc::Controller,
    service: UserService,
}

impl UserCtrl {
    /// Lists every user.
    /// @GET(path="/all")
    pub fn list(&self) -> Vec<String> {
        self.service.names()
    }

    /// @GET(path="/detail")
    /// @Auth -> admin
    pub fn detail(&self) -> Option<String> {
        None
    }

    /// @POST(path="/")
    pub fn create(&mut self) {}

    fn validate(&self) -> bool {
        true
    }
}

/// Not a controller, only shares a file with one.
#[derive(Default)]
pub struct AuditLog {
    _bean: ioc::Bean,
}
