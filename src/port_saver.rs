use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Orbit, Rocket};
use tokio::sync::watch;

pub fn create_pair() -> (PortSaver, Port) {
    let (sender, receiver) = watch::channel(None);
    (PortSaver { sender }, Port { receiver })
}

/// The port a launched server ended up listening on.
pub struct Port {
    receiver: watch::Receiver<Option<u16>>,
}

impl Port {
    /// Waits until the server is listening. `None` if it shut down first.
    pub async fn get(&self) -> Option<u16> {
        let mut receiver = self.receiver.clone();
        loop {
            let bound = *receiver.borrow();
            if bound.is_some() {
                return bound;
            }
            if receiver.changed().await.is_err() {
                return None;
            }
        }
    }
}

pub struct PortSaver {
    sender: watch::Sender<Option<u16>>,
}

#[rocket::async_trait]
impl Fairing for PortSaver {
    fn info(&self) -> Info {
        Info {
            name: "Port Saver",
            kind: Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let port = rocket.config().port;
        tracing::info!(port, "Server is listening");
        // Nobody waiting on the port is fine.
        let _ = self.sender.send(Some(port));
    }
}
