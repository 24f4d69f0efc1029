//! In-page anchor links.

use std::rc::Rc;

use crate::{
    config::AnchorConfig,
    env::{DomEvent, EventKind, ListenTarget},
    Environment,
};

/// Smooth scrolling for in-page `#fragment` links.
///
/// The browser jump is always suppressed; the scroll only happens when the
/// fragment resolves to an element.
pub fn install_anchor_scroll<E: Environment>(env: &Rc<E>, config: &AnchorConfig) -> usize {
    let links = env.query_all(&config.links);
    let count = links.len();

    for link in links {
        let env_ref = Rc::clone(env);
        let target_link = link.clone();
        env.listen(
            ListenTarget::Element(link),
            EventKind::Click,
            Rc::new(move |event: &DomEvent<E::Element>| {
                event.prevent_default();
                scroll_to_fragment(env_ref.as_ref(), &target_link);
            }),
        );
    }

    count
}

fn scroll_to_fragment<E: Environment>(env: &E, link: &E::Element) {
    let Some(href) = env.attribute(link, "href") else {
        return;
    };
    match env.query(&href) {
        Some(target) => env.scroll_into_view(&target),
        None => tracing::debug!(%href, "anchor target not found"),
    }
}
