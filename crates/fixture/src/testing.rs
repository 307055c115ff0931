//! Testing infrastructure for the fixture layer.
//!
//! [`MockDriver`] implements [`Driver`] over an in-memory fake DOM so
//! scenarios and fixture utilities can be exercised without spawning a
//! browser. Element state is keyed by [`Locator::key`] (strategy only);
//! the pick rule is applied per operation. Click side effects are
//! scripted per locator key, which is how tests model the app reacting
//! to interaction (adding a list item, closing an overlay).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::driver::Driver;
use crate::error::{FixtureError, Result};
use crate::locator::{Locator, Pick};

/// One fake element: visibility plus an input value.
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    pub visible: bool,
    pub value: String,
}

impl MockElement {
    pub fn visible() -> Self {
        Self {
            visible: true,
            value: String::new(),
        }
    }

    pub fn visible_with_value(value: impl Into<String>) -> Self {
        Self {
            visible: true,
            value: value.into(),
        }
    }
}

/// The fake DOM handed to click-effect closures.
#[derive(Default)]
pub struct MockDom {
    elements: HashMap<String, Vec<MockElement>>,
}

impl MockDom {
    pub fn add(&mut self, key: &str, element: MockElement) {
        self.elements.entry(key.to_string()).or_default().push(element);
    }

    pub fn remove_last(&mut self, key: &str) {
        if let Some(list) = self.elements.get_mut(key) {
            list.pop();
        }
    }

    pub fn remove_all(&mut self, key: &str) {
        self.elements.remove(key);
    }

    pub fn count(&self, key: &str) -> usize {
        self.elements.get(key).map_or(0, Vec::len)
    }

    fn picked_mut(&mut self, locator: &Locator) -> Option<&mut MockElement> {
        let list = self.elements.get_mut(&locator.key())?;
        match locator.pick {
            Pick::First => list.first_mut(),
            Pick::Last => list.last_mut(),
            Pick::Nth(n) => list.get_mut(n),
        }
    }

    fn picked(&self, locator: &Locator) -> Option<&MockElement> {
        let list = self.elements.get(&locator.key())?;
        match locator.pick {
            Pick::First => list.first(),
            Pick::Last => list.last(),
            Pick::Nth(n) => list.get(n),
        }
    }
}

type ClickEffect = Box<dyn FnMut(&mut MockDom) + Send>;

/// Action recorded by [`MockDriver`] for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAction {
    Goto { url: String },
    Reload,
    Eval { expression: String },
    Click { key: String },
    Fill { key: String, text: String },
    Screenshot,
}

#[derive(Default)]
pub struct MockDriver {
    dom: Mutex<MockDom>,
    click_effects: Mutex<HashMap<String, ClickEffect>>,
    eval_results: Mutex<HashMap<String, Value>>,
    actions: Mutex<Vec<MockAction>>,
    html: Mutex<String>,
    dialogs_accepted: Mutex<bool>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            html: Mutex::new("<html><body></body></html>".to_string()),
            ..Self::default()
        }
    }

    /// Register one visible element for the locator's strategy.
    pub fn add_visible(&self, locator: &Locator) {
        self.dom
            .lock()
            .unwrap()
            .add(&locator.key(), MockElement::visible());
    }

    pub fn add_element(&self, locator: &Locator, element: MockElement) {
        self.dom.lock().unwrap().add(&locator.key(), element);
    }

    /// Script what the fake app does when this locator is clicked.
    pub fn on_click<F>(&self, locator: &Locator, effect: F)
    where
        F: FnMut(&mut MockDom) + Send + 'static,
    {
        self.click_effects
            .lock()
            .unwrap()
            .insert(locator.key(), Box::new(effect));
    }

    pub fn set_eval_result(&self, expression: &str, result: Value) {
        self.eval_results
            .lock()
            .unwrap()
            .insert(expression.to_string(), result);
    }

    pub fn set_page_html(&self, html: &str) {
        *self.html.lock().unwrap() = html.to_string();
    }

    pub fn actions(&self) -> Vec<MockAction> {
        self.actions.lock().unwrap().clone()
    }

    pub fn dialogs_accepted(&self) -> bool {
        *self.dialogs_accepted.lock().unwrap()
    }

    pub fn element_count(&self, locator: &Locator) -> usize {
        self.dom.lock().unwrap().count(&locator.key())
    }

    fn record(&self, action: MockAction) {
        self.actions.lock().unwrap().push(action);
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(MockAction::Goto {
            url: url.to_string(),
        });
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.record(MockAction::Reload);
        Ok(())
    }

    async fn eval(&self, expression: &str) -> Result<Value> {
        self.record(MockAction::Eval {
            expression: expression.to_string(),
        });
        Ok(self
            .eval_results
            .lock()
            .unwrap()
            .get(expression)
            .cloned()
            .unwrap_or(Value::Null))
    }

    async fn count(&self, locator: &Locator) -> Result<usize> {
        Ok(self.dom.lock().unwrap().count(&locator.key()))
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        Ok(self
            .dom
            .lock()
            .unwrap()
            .picked(locator)
            .is_some_and(|el| el.visible))
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let key = locator.key();
        if self.dom.lock().unwrap().picked(locator).is_none() {
            return Err(FixtureError::ElementNotFound {
                locator: locator.to_string(),
            });
        }
        self.record(MockAction::Click { key: key.clone() });
        // Run the scripted side effect outside the dom lock scope above.
        if let Some(effect) = self.click_effects.lock().unwrap().get_mut(&key) {
            effect(&mut self.dom.lock().unwrap());
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, text: &str) -> Result<String> {
        let mut dom = self.dom.lock().unwrap();
        let Some(el) = dom.picked_mut(locator) else {
            return Err(FixtureError::ElementNotFound {
                locator: locator.to_string(),
            });
        };
        el.value = text.to_string();
        drop(dom);
        self.record(MockAction::Fill {
            key: locator.key(),
            text: text.to_string(),
        });
        Ok(text.to_string())
    }

    async fn value(&self, locator: &Locator) -> Result<String> {
        self.dom
            .lock()
            .unwrap()
            .picked(locator)
            .map(|el| el.value.clone())
            .ok_or_else(|| FixtureError::ElementNotFound {
                locator: locator.to_string(),
            })
    }

    async fn scroll_into_view(&self, locator: &Locator) -> Result<()> {
        if self.dom.lock().unwrap().picked(locator).is_none() {
            return Err(FixtureError::ElementNotFound {
                locator: locator.to_string(),
            });
        }
        Ok(())
    }

    async fn page_html(&self) -> Result<String> {
        Ok(self.html.lock().unwrap().clone())
    }

    async fn accept_dialogs(&self) -> Result<()> {
        *self.dialogs_accepted.lock().unwrap() = true;
        Ok(())
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.record(MockAction::Screenshot);
        Ok(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
    }

    async fn pause(&self, _duration: Duration) {
        // Mock time never passes.
    }
}
