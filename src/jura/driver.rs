use crate::prelude::*;

/// A request/response exchange with a machine. Async trait methods are not
/// there yet, so the driver returns boxed futures via [`AsyncFuture`].
///
/// Drivers must tolerate concurrent exchanges: the scheduled status poll
/// and a host command may be in flight at the same time.
pub trait JuraDriver: Send + Sync {
    /// Sends one command payload and resolves to the raw response text,
    /// acknowledgement prefix and all.
    fn exchange<'a>(&'a self, payload: &'a str) -> AsyncFuture<'a, String>;
}

#[cfg(test)]
pub(crate) mod test {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Scripted driver for tests: answers with canned replies in order and
    /// records every payload it was sent. Once the script runs dry it
    /// answers like a bridge that lost its machine.
    pub struct ScriptedDriver {
        replies: Mutex<VecDeque<String>>,
        sent: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedDriver {
        pub fn new<'a>(replies: impl IntoIterator<Item = &'a str>) -> ScriptedDriver {
            ScriptedDriver {
                replies: Mutex::new(replies.into_iter().map(str::to_owned).collect()),
                sent: Arc::new(Mutex::new(vec![])),
            }
        }

        /// The payloads sent so far. The log outlives the driver, so tests
        /// can keep watching after the adapter is gone.
        pub fn sent_log(&self) -> Arc<Mutex<Vec<String>>> {
            self.sent.clone()
        }

        pub fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl JuraDriver for ScriptedDriver {
        fn exchange<'a>(&'a self, payload: &'a str) -> AsyncFuture<'a, String> {
            self.sent.lock().unwrap().push(payload.to_owned());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| "err:script exhausted".to_owned());
            Box::pin(async move { Ok(reply) })
        }
    }

    #[tokio::test]
    async fn scripted_driver_replies_in_order() {
        let driver = ScriptedDriver::new(["rt:0001", "ok:"]);
        assert_eq!(driver.exchange("RT:0000").await.unwrap(), "rt:0001");
        assert_eq!(driver.exchange("AN:02").await.unwrap(), "ok:");
        assert_eq!(
            driver.exchange("RT:0000").await.unwrap(),
            "err:script exhausted"
        );
        assert_eq!(driver.sent(), vec!["RT:0000", "AN:02", "RT:0000"]);
    }
}
