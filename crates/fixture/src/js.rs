//! Generated JavaScript snippets executed in the page under test.
//!
//! Every DOM interaction goes through `Runtime.evaluate`, so each helper
//! here builds a self-contained IIFE returning a JSON-serializable value:
//! `null`/`false` for "not found", otherwise the requested data.

use crate::locator::{Locator, Pick, Strategy};

/// Embed a Rust string as a quoted JS string literal.
pub fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Expression evaluating to an array of candidate elements.
fn candidates_expr(strategy: &Strategy) -> String {
    match strategy {
        Strategy::Css(selector) => {
            format!("Array.from(document.querySelectorAll({}))", js_string(selector))
        }
        Strategy::Placeholder(placeholder) => {
            let sel = format!(
                "input[placeholder={p}], textarea[placeholder={p}]",
                p = js_string(placeholder)
            );
            format!("Array.from(document.querySelectorAll({}))", js_string(&sel))
        }
        Strategy::Text(needle) => format!(
            r#"(() => {{
                const needle = {needle};
                const all = Array.from(document.querySelectorAll('body *'));
                const hits = all.filter(el =>
                    ((el.innerText || el.textContent || '').trim()).includes(needle));
                return hits.filter(el => !hits.some(o => o !== el && el.contains(o)));
            }})()"#,
            needle = js_string(needle)
        ),
        Strategy::Button(name) => format!(
            r#"(() => {{
                const name = {name};
                const all = Array.from(document.querySelectorAll('button, [role="button"]'));
                return all.filter(el => {{
                    const label = el.getAttribute('aria-label') || el.innerText || el.textContent || '';
                    return label.trim().includes(name);
                }});
            }})()"#,
            name = js_string(name)
        ),
        Strategy::RowButton(inner) => format!(
            r#"(() => {{
                const host = {host};
                if (!host) return [];
                const row = host.parentElement && host.parentElement.parentElement;
                return row ? Array.from(row.querySelectorAll('button')) : [];
            }})()"#,
            host = picked_expr(inner)
        ),
    }
}

/// Expression evaluating to the picked element or `null`.
fn picked_expr(locator: &Locator) -> String {
    let index = match locator.pick {
        Pick::First => "0".to_string(),
        Pick::Last => "els.length - 1".to_string(),
        Pick::Nth(n) => n.to_string(),
    };
    format!(
        r#"(() => {{
            const els = {candidates};
            if (!els.length) return null;
            return els[{index}] || null;
        }})()"#,
        candidates = candidates_expr(&locator.strategy),
    )
}

pub fn count_js(locator: &Locator) -> String {
    format!("(() => ({}).length)()", candidates_expr(&locator.strategy))
}

pub fn visible_js(locator: &Locator) -> String {
    format!(
        r#"(() => {{
            const el = {el};
            if (!el) return false;
            const rect = el.getBoundingClientRect();
            const style = getComputedStyle(el);
            return rect.width > 0 && rect.height > 0
                && style.visibility !== 'hidden' && style.display !== 'none';
        }})()"#,
        el = picked_expr(locator)
    )
}

pub fn click_js(locator: &Locator) -> String {
    format!(
        r#"(() => {{
            const el = {el};
            if (!el) return false;
            el.scrollIntoView({{ block: 'center' }});
            el.click();
            return true;
        }})()"#,
        el = picked_expr(locator)
    )
}

/// Fill via the native value setter so framework-bound inputs observe the
/// change, then raise `input`/`change`.
pub fn fill_js(locator: &Locator, text: &str) -> String {
    format!(
        r#"(() => {{
            const el = {el};
            if (!el) return null;
            const proto = el.tagName === 'TEXTAREA'
                ? window.HTMLTextAreaElement.prototype
                : window.HTMLInputElement.prototype;
            const setter = Object.getOwnPropertyDescriptor(proto, 'value').set;
            setter.call(el, {text});
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return el.value;
        }})()"#,
        el = picked_expr(locator),
        text = js_string(text)
    )
}

pub fn value_js(locator: &Locator) -> String {
    format!(
        r#"(() => {{
            const el = {el};
            return el ? el.value : null;
        }})()"#,
        el = picked_expr(locator)
    )
}

pub fn scroll_into_view_js(locator: &Locator) -> String {
    format!(
        r#"(() => {{
            const el = {el};
            if (!el) return false;
            el.scrollIntoView({{ block: 'center' }});
            return true;
        }})()"#,
        el = picked_expr(locator)
    )
}

pub fn page_html_js() -> &'static str {
    "document.documentElement.outerHTML"
}

/// Remove full-screen overlay containers outright and restore body scroll.
/// Covers both the plain `.fixed.inset-0` pattern and the z-indexed modal
/// variants the app uses.
pub fn remove_overlays_js() -> &'static str {
    r#"(() => {
        let removed = 0;
        document.querySelectorAll('.fixed.inset-0').forEach(el => { el.remove(); removed += 1; });
        document
            .querySelectorAll('div[class*="inset-0"][class*="z-[100]"], div[class*="inset-0"][class*="z-50"]')
            .forEach(el => { el.remove(); removed += 1; });
        document.body.style.overflow = 'auto';
        return removed;
    })()"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_string_escapes_quotes() {
        assert_eq!(js_string("a'b\"c"), r#""a'b\"c""#);
    }

    #[test]
    fn count_targets_all_matches() {
        let js = count_js(&Locator::placeholder("Plan Name").last());
        assert!(js.contains("input[placeholder=\\\"Plan Name\\\"]"));
        assert!(js.contains(".length"));
    }

    #[test]
    fn picked_expr_respects_last() {
        let js = value_js(&Locator::css("input").last());
        assert!(js.contains("els[els.length - 1]"));
    }

    #[test]
    fn fill_uses_native_setter() {
        let js = fill_js(&Locator::placeholder("Note Title"), "Test Note 1");
        assert!(js.contains("getOwnPropertyDescriptor"));
        assert!(js.contains("new Event('input'"));
        assert!(js.contains("\"Test Note 1\""));
    }

    #[test]
    fn row_button_walks_two_ancestors() {
        let inner = Locator::css("input[value='Verified Plan']").last();
        let js = click_js(&Locator::row_button_of(inner));
        assert!(js.contains("parentElement.parentElement"));
        assert!(js.contains("querySelectorAll('button')"));
    }

    #[test]
    fn text_strategy_keeps_deepest_match() {
        let js = visible_js(&Locator::text("Admin Console"));
        assert!(js.contains("el.contains(o)"));
        assert!(js.contains("\"Admin Console\""));
    }
}
