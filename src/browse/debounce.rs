use crate::browse::search::search_products;
use crate::data::models::product::Product;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub const SEARCH_DELAY: Duration = Duration::from_millis(300);

/// Republishes a value only once it has stopped changing for `delay`.
///
/// Must be created inside a Tokio runtime. The background task ends when
/// the debouncer is dropped, after publishing the last pending value.
pub struct Debouncer<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, mut input_rx) = watch::channel(initial.clone());
        let (output_tx, output) = watch::channel(initial);

        tokio::spawn(async move {
            while input_rx.changed().await.is_ok() {
                let mut closed = false;

                loop {
                    match tokio::time::timeout(delay, input_rx.changed()).await {
                        Ok(Ok(())) => continue,
                        Ok(Err(_)) => {
                            closed = true;
                            break;
                        }
                        Err(_) => break,
                    }
                }

                let settled = input_rx.borrow_and_update().clone();
                if output_tx.send(settled).is_err() || closed {
                    break;
                }
            }
        });

        Debouncer { input, output }
    }

    pub fn set(&self, value: T) {
        self.input.send_replace(value);
    }

    /// Latest settled value.
    pub fn settled(&self) -> T {
        self.output.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }
}

/// State behind a search box: keystrokes are debounced before the product
/// list is searched.
pub struct SearchSession {
    query: String,
    input: Debouncer<String>,
    results: Arc<watch::Sender<Vec<Product>>>,
}

impl SearchSession {
    pub fn new(products: Vec<Product>) -> Self {
        Self::with_delay(products, SEARCH_DELAY)
    }

    pub fn with_delay(products: Vec<Product>, delay: Duration) -> Self {
        let input = Debouncer::new(String::new(), delay);
        let (results_tx, _) = watch::channel(Vec::new());
        let results = Arc::new(results_tx);

        let mut settled = input.subscribe();
        let publisher = Arc::clone(&results);
        tokio::spawn(async move {
            while settled.changed().await.is_ok() {
                let query = settled.borrow_and_update().clone();
                publisher.send_replace(search_products(&products, &query));
            }
        });

        SearchSession {
            query: String::new(),
            input,
            results,
        }
    }

    pub fn type_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.input.set(self.query.clone());
    }

    /// Picking a suggested category fills the box like typing would.
    pub fn pick_suggestion(&mut self, category: &str) {
        self.type_query(category);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> Vec<Product> {
        self.results.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.results.subscribe()
    }

    /// Closing the dialog forgets the query and its results.
    pub fn close(&mut self) {
        self.query.clear();
        self.input.set(String::new());
        self.results.send_replace(Vec::new());
    }
}
