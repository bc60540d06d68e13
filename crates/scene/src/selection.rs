use catalog::Site;

pub type SelectionConsumer = Box<dyn FnMut(&Site)>;

/// Forwards individual-marker activations to an external consumer.
///
/// A relay without a consumer drops selections silently.
#[derive(Default)]
pub struct SelectionRelay {
    consumer: Option<SelectionConsumer>,
}

impl SelectionRelay {
    pub fn new(consumer: impl FnMut(&Site) + 'static) -> Self {
        Self {
            consumer: Some(Box::new(consumer)),
        }
    }

    pub fn detached() -> Self {
        Self::default()
    }

    pub fn set_consumer(&mut self, consumer: impl FnMut(&Site) + 'static) {
        self.consumer = Some(Box::new(consumer));
    }

    pub fn clear_consumer(&mut self) {
        self.consumer = None;
    }

    pub fn has_consumer(&self) -> bool {
        self.consumer.is_some()
    }

    /// Hands `site` to the consumer unchanged.
    ///
    /// Returns `true` if a consumer received it.
    pub fn on_select(&mut self, site: &Site) -> bool {
        match self.consumer.as_mut() {
            Some(consumer) => {
                consumer(site);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for SelectionRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionRelay")
            .field("has_consumer", &self.has_consumer())
            .finish()
    }
}
