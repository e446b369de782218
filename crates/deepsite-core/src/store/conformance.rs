//! Behaviour every `WebsiteStore` backend must share.

#![allow(clippy::unwrap_used)]

use super::WebsiteStore;
use crate::{ArtifactId, Error, GeneratedContent, NewWebsite, UserId};

pub(crate) fn content(title: &str) -> GeneratedContent {
    GeneratedContent {
        title: title.to_string(),
        description: format!("A beautiful website about {title}"),
        html_content: format!("<h1>{title}</h1>"),
        css_content: "h1 { color: #5928e5; }".to_string(),
        js_content: "console.log('Website loaded');".to_string(),
    }
}

pub(crate) async fn round_trip(store: &dyn WebsiteStore) {
    let owner = UserId::new("user-1").unwrap();
    let website = NewWebsite::new(owner.clone(), content("Bakery"))
        .with_preview_image(Some("https://example.com/preview.png".into()));

    let saved = store.save(website).await.unwrap();
    let fetched = store.get_by_id(&saved.id).await.unwrap();

    assert_eq!(fetched, saved);
    assert_eq!(fetched.content(), content("Bakery"));
    assert_eq!(fetched.owner, owner);
    assert_eq!(fetched.created_at, fetched.updated_at);
    assert_eq!(
        fetched.preview_image_url.as_deref(),
        Some("https://example.com/preview.png")
    );
}

pub(crate) async fn list_is_newest_first_and_scoped(store: &dyn WebsiteStore) {
    let alice = UserId::new("alice").unwrap();
    let bob = UserId::new("bob").unwrap();

    let mut saved_ids = Vec::new();
    for n in 0..5 {
        let saved = store
            .save(NewWebsite::new(alice.clone(), content(&format!("Site {n}"))))
            .await
            .unwrap();
        saved_ids.push(saved.id);
    }
    store
        .save(NewWebsite::new(bob.clone(), content("Other")))
        .await
        .unwrap();

    let listed = store.list(&alice).await.unwrap();
    assert_eq!(listed.len(), 5);
    assert!(listed.iter().all(|w| w.owner == alice));
    assert!(listed.windows(2).all(|w| w[0].created_at > w[1].created_at));

    saved_ids.reverse();
    let listed_ids: Vec<_> = listed.into_iter().map(|w| w.id).collect();
    assert_eq!(listed_ids, saved_ids);

    assert_eq!(store.list(&bob).await.unwrap().len(), 1);
}

pub(crate) async fn empty_owner_lists_nothing(store: &dyn WebsiteStore) {
    let nobody = UserId::new("nobody").unwrap();
    assert!(store.list(&nobody).await.unwrap().is_empty());
}

pub(crate) async fn unknown_id_is_not_found(store: &dyn WebsiteStore) {
    let missing = ArtifactId::generate();
    let result = store.get_by_id(&missing).await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

pub(crate) async fn ids_are_unique(store: &dyn WebsiteStore) {
    let owner = UserId::new("user-1").unwrap();
    let first = store.save(NewWebsite::new(owner.clone(), content("A"))).await.unwrap();
    let second = store.save(NewWebsite::new(owner, content("A"))).await.unwrap();
    assert_ne!(first.id, second.id);
}
