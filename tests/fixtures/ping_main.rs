use gin_plus::mvc;

#[derive(Default)]
pub struct PingCtrl(mvc::Controller);

impl PingCtrl {
    /// @GET(path="/ping")
    pub fn ping(&self) -> &'static str {
        "pong"
    }
}

fn main() {}
