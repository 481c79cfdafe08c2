//! Asynchronous icon cache
//!
//! One load per distinct icon reference. A load hands back an [`IconSlot`],
//! a promise-like handle the loader completes later; drawing only checks
//! whether the slot holds a finished image and never waits on it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::SandboxError;

const DEVICON_CDN: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";

/// Load progress of one icon
#[derive(Debug)]
pub enum IconState<I> {
    Loading,
    Ready(Rc<I>),
    Failed,
}

/// Shared completion handle for one icon load
#[derive(Debug)]
pub struct IconSlot<I> {
    state: Rc<RefCell<IconState<I>>>,
}

impl<I> Clone for IconSlot<I> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<I> IconSlot<I> {
    fn loading() -> Self {
        Self {
            state: Rc::new(RefCell::new(IconState::Loading)),
        }
    }

    /// Complete the load. Failures are logged; the slot is marked failed.
    pub fn resolve(&self, result: Result<I, SandboxError>) {
        let next = match result {
            Ok(image) => IconState::Ready(Rc::new(image)),
            Err(e) => {
                log::warn!("{e}");
                IconState::Failed
            }
        };
        *self.state.borrow_mut() = next;
    }

    /// Finished image, if any
    pub fn image(&self) -> Option<Rc<I>> {
        match &*self.state.borrow() {
            IconState::Ready(image) => Some(Rc::clone(image)),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state.borrow(), IconState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(*self.state.borrow(), IconState::Failed)
    }
}

/// Starts fetching an image and completes the slot when done
pub trait IconLoader {
    type Image;

    fn load(&self, url: &str, slot: IconSlot<Self::Image>);
}

/// Resolve a devicon class (`devicon-react-original colored`) to its SVG URL.
///
/// Uses the first `devicon-<name>-<style>` run, ASCII alphanumerics only,
/// matched case-insensitively.
pub fn devicon_url(icon_ref: &str) -> Result<String, SandboxError> {
    const PREFIX: &str = "devicon-";
    let lower = icon_ref.to_ascii_lowercase();

    let mut from = 0;
    while let Some(found) = lower[from..].find(PREFIX) {
        let start = from + found + PREFIX.len();
        let rest = &icon_ref[start..];

        let name_len = alnum_run(rest);
        if name_len > 0 && rest[name_len..].starts_with('-') {
            let style_part = &rest[name_len + 1..];
            let style_len = alnum_run(style_part);
            if style_len > 0 {
                let name = &rest[..name_len];
                let style = &style_part[..style_len];
                return Ok(format!("{DEVICON_CDN}/{name}/{name}-{style}.svg"));
            }
        }
        from = start;
    }

    Err(SandboxError::InvalidIconRef(icon_ref.to_string()))
}

fn alnum_run(s: &str) -> usize {
    s.bytes().take_while(|b| b.is_ascii_alphanumeric()).count()
}

/// Memoized icon loads keyed by icon reference
#[derive(Debug)]
pub struct IconCache<I> {
    slots: HashMap<String, IconSlot<I>>,
}

impl<I> Default for IconCache<I> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<I> IconCache<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the slot for `icon_ref`, starting a load if there is none yet.
    /// A failed slot is replaced by a fresh load.
    pub fn get_or_load<L>(&mut self, icon_ref: &str, loader: &L) -> IconSlot<I>
    where
        L: IconLoader<Image = I> + ?Sized,
    {
        if let Some(slot) = self.slots.get(icon_ref) {
            if !slot.is_failed() {
                return slot.clone();
            }
            log::info!("Retrying icon {icon_ref}");
        }

        let slot = IconSlot::loading();
        match devicon_url(icon_ref) {
            Ok(url) => {
                log::debug!("Loading icon {url}");
                loader.load(&url, slot.clone());
            }
            Err(e) => slot.resolve(Err(e)),
        }
        self.slots.insert(icon_ref.to_string(), slot.clone());
        slot
    }

    /// Whether a load for `icon_ref` has ever been started
    pub fn contains(&self, icon_ref: &str) -> bool {
        self.slots.contains_key(icon_ref)
    }

    /// Finished image for `icon_ref`, without starting anything
    pub fn image(&self, icon_ref: &str) -> Option<Rc<I>> {
        self.slots.get(icon_ref).and_then(IconSlot::image)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualLoader;
    use super::*;

    #[test]
    fn test_devicon_url() {
        assert_eq!(
            devicon_url("devicon-react-original colored").unwrap(),
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/react/react-original.svg"
        );
        assert_eq!(
            devicon_url("devicon-jetpackcompose-plain-wordmark colored").unwrap(),
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/jetpackcompose/jetpackcompose-plain.svg"
        );
        assert!(devicon_url("Devicon-HTML5-Plain").unwrap().ends_with("/HTML5/HTML5-Plain.svg"));
        assert!(devicon_url("colored devicon-css3-plain").is_ok());
    }

    #[test]
    fn test_devicon_url_rejects_malformed() {
        assert!(matches!(
            devicon_url("fa-react"),
            Err(SandboxError::InvalidIconRef(_))
        ));
        assert!(devicon_url("devicon-react").is_err());
        assert!(devicon_url("devicon--plain").is_err());
        // A later well-formed class still matches
        assert!(devicon_url("devicon- devicon-git-plain").is_ok());
    }

    #[test]
    fn test_get_or_load_is_memoized() {
        let loader = ManualLoader::default();
        let mut cache = IconCache::new();

        let first = cache.get_or_load("devicon-react-original", &loader);
        let second = cache.get_or_load("devicon-react-original", &loader);
        assert_eq!(loader.request_count(), 1);
        assert!(first.is_loading());
        assert!(cache.image("devicon-react-original").is_none());

        loader.finish_all();
        assert!(second.image().is_some());
        assert_eq!(
            cache.image("devicon-react-original").as_deref().map(String::as_str),
            Some("https://cdn.jsdelivr.net/gh/devicons/devicon/icons/react/react-original.svg")
        );
    }

    #[test]
    fn test_failed_load_retries_on_next_request() {
        let loader = ManualLoader::default();
        let mut cache = IconCache::new();

        cache.get_or_load("devicon-git-plain", &loader);
        loader.fail_all();
        assert!(cache.image("devicon-git-plain").is_none());
        assert!(cache.contains("devicon-git-plain"));

        let retry = cache.get_or_load("devicon-git-plain", &loader);
        assert_eq!(loader.request_count(), 2);
        loader.finish_all();
        assert!(retry.image().is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalid_ref_fails_without_loading() {
        let loader = ManualLoader::default();
        let mut cache = IconCache::new();
        let slot = cache.get_or_load("not-an-icon", &loader);
        assert!(slot.is_failed());
        assert_eq!(loader.request_count(), 0);
    }
}
