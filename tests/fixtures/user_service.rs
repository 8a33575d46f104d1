use gin_plus::ioc as container;

#[derive(Default)]
pub struct UserService {
    _bean: container::Bean,
    names: Vec<String>,
}

impl UserService {
    /// @GET(path="/not-a-route")
    pub fn names(&self) -> Vec<String> {
        self.names.clone()
    }
}
