//! Browser session lifecycle over CDP.
//!
//! One browser process, one page, sequential round trips — the whole
//! verification run is single-threaded apart from the CDP event pump.
//! Callers must reach [`Session::close`] on every exit path; the scenario
//! runner wraps execution so the browser is released even when a step
//! fails mid-run.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams, EventJavascriptDialogOpening,
    HandleJavaScriptDialogParams, ReloadParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::driver::Driver;
use crate::error::{FixtureError, Result};
use crate::js;
use crate::locator::Locator;

const VIEWPORT: (u32, u32) = (1280, 720);

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Run with a visible browser window instead of headless.
    pub headful: bool,
}

pub struct Session {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

impl Session {
    pub async fn launch(options: &LaunchOptions) -> Result<Self> {
        debug!(target = "uiv", headful = options.headful, "launching browser");
        let mut builder = BrowserConfig::builder()
            .window_size(VIEWPORT.0, VIEWPORT.1)
            .no_sandbox();
        if options.headful {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(FixtureError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FixtureError::BrowserLaunch(e.to_string()))?;

        // Pump CDP events until the connection drops.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            handler_task,
            page,
        })
    }

    /// Close the browser and stop the event pump. Must run on every exit
    /// path to avoid orphaned browser processes.
    pub async fn close(mut self) -> Result<()> {
        if let Err(err) = self.browser.close().await {
            warn!(target = "uiv", error = %err, "browser close failed");
        }
        self.handler_task.abort();
        Ok(())
    }

    async fn eval_value(&self, expression: &str) -> Result<Value> {
        let result = self
            .page
            .evaluate(expression.to_string())
            .await
            .map_err(|e| FixtureError::JsEval(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl Driver for Session {
    async fn goto(&self, url: &str) -> Result<()> {
        debug!(target = "uiv", %url, "goto");
        self.page
            .goto(url)
            .await
            .map_err(|source| FixtureError::Navigation {
                url: url.to_string(),
                source,
            })?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        debug!(target = "uiv", "reload");
        self.page.execute(ReloadParams::default()).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn eval(&self, expression: &str) -> Result<Value> {
        self.eval_value(expression).await
    }

    async fn count(&self, locator: &Locator) -> Result<usize> {
        let value = self.eval_value(&js::count_js(locator)).await?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        let value = self.eval_value(&js::visible_js(locator)).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let value = self.eval_value(&js::click_js(locator)).await?;
        if value.as_bool().unwrap_or(false) {
            Ok(())
        } else {
            Err(FixtureError::ElementNotFound {
                locator: locator.to_string(),
            })
        }
    }

    async fn fill(&self, locator: &Locator, text: &str) -> Result<String> {
        let value = self.eval_value(&js::fill_js(locator, text)).await?;
        match value {
            Value::String(read_back) => Ok(read_back),
            _ => Err(FixtureError::ElementNotFound {
                locator: locator.to_string(),
            }),
        }
    }

    async fn value(&self, locator: &Locator) -> Result<String> {
        let value = self.eval_value(&js::value_js(locator)).await?;
        match value {
            Value::String(s) => Ok(s),
            _ => Err(FixtureError::ElementNotFound {
                locator: locator.to_string(),
            }),
        }
    }

    async fn scroll_into_view(&self, locator: &Locator) -> Result<()> {
        let value = self.eval_value(&js::scroll_into_view_js(locator)).await?;
        if value.as_bool().unwrap_or(false) {
            Ok(())
        } else {
            Err(FixtureError::ElementNotFound {
                locator: locator.to_string(),
            })
        }
    }

    async fn page_html(&self) -> Result<String> {
        let value = self.eval_value(js::page_html_js()).await?;
        match value {
            Value::String(html) => Ok(html),
            _ => Err(FixtureError::JsEval("page HTML unavailable".to_string())),
        }
    }

    async fn accept_dialogs(&self) -> Result<()> {
        let mut dialogs = self
            .page
            .event_listener::<EventJavascriptDialogOpening>()
            .await?;
        let page = self.page.clone();
        tokio::spawn(async move {
            while let Some(dialog) = dialogs.next().await {
                debug!(target = "uiv", message = %dialog.message, "accepting dialog");
                let accept = HandleJavaScriptDialogParams {
                    accept: true,
                    prompt_text: None,
                };
                if page.execute(accept).await.is_err() {
                    break;
                }
            }
        });
        Ok(())
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>> {
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let response = self.page.execute(params).await?;
        let bytes = BASE64
            .decode(&response.data)
            .map_err(|e| FixtureError::JsEval(format!("screenshot decode failed: {e}")))?;
        Ok(bytes)
    }

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
