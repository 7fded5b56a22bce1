use anyhow::{Context as _, bail};
use codegate_core::{CacheStore, Creature, CreatureCache};
use futures_util::future::{Either, select};
use gloo::net::http::Request;
use gloo::storage::{LocalStorage, Storage};
use gloo::timers::future::TimeoutFuture;
use std::pin::pin;
use yew::prelude::*;

/// Raw strings in the browser's local storage.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalStore;

impl CacheStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: String) {
        if let Err(err) = LocalStorage::raw().set_item(key, &value) {
            log::warn!("failed to cache {}: {:?}", key, err);
        }
    }

    fn remove(&mut self, key: &str) {
        LocalStorage::delete(key);
    }
}

pub(crate) fn creature_url(api_base: &str, id: u32) -> String {
    format!("{}/pokemon/{}", api_base.trim_end_matches('/'), id)
}

/// Cached creature, else a fresh fetch that is cached on success.
///
/// Never fails: any problem is logged and yields `None`.
pub(crate) async fn get_or_fetch(api_base: &str, id: u32, timeout_ms: u32) -> Option<Creature> {
    let mut cache = CreatureCache::new(LocalStore);
    if let Some(creature) = cache.cached(id) {
        log::trace!("creature {} from cache", id);
        return Some(creature);
    }

    match fetch_with_timeout(api_base, id, timeout_ms).await {
        Ok(creature) => {
            cache.store(&creature);
            Some(creature)
        }
        Err(err) => {
            log::warn!("creature {} unavailable: {:#}", id, err);
            None
        }
    }
}

async fn fetch_with_timeout(api_base: &str, id: u32, timeout_ms: u32) -> anyhow::Result<Creature> {
    let fetch = pin!(fetch_creature(api_base, id));
    let timeout = pin!(TimeoutFuture::new(timeout_ms));
    match select(fetch, timeout).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => bail!("timed out after {} ms", timeout_ms),
    }
}

async fn fetch_creature(api_base: &str, id: u32) -> anyhow::Result<Creature> {
    let url = creature_url(api_base, id);
    let response = Request::get(&url)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?;
    if !response.ok() {
        bail!("{} answered {}", url, response.status());
    }
    let body = response.text().await.context("unreadable body")?;
    Creature::from_api_json(&body).context("unexpected creature payload")
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct CreatureBadgeProps {
    pub id: u32,
    pub api_base: AttrValue,
    pub timeout_ms: u32,
}

pub(crate) enum Msg {
    Loaded(Option<Creature>),
}

/// Creature portrait for a volunteer card, with a placeholder while loading
/// or when the record is unavailable.
pub(crate) struct CreatureBadge {
    creature: Option<Creature>,
    loading: bool,
}

impl CreatureBadge {
    fn load(ctx: &Context<Self>) {
        let CreatureBadgeProps {
            id,
            api_base,
            timeout_ms,
        } = ctx.props().clone();
        ctx.link().send_future(async move {
            Msg::Loaded(get_or_fetch(&api_base, id, timeout_ms).await)
        });
    }
}

impl Component for CreatureBadge {
    type Message = Msg;
    type Properties = CreatureBadgeProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::load(ctx);
        Self {
            creature: None,
            loading: true,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Msg::Loaded(creature) = msg;
        self.creature = creature;
        self.loading = false;
        true
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().id != old_props.id {
            self.loading = true;
            Self::load(ctx);
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        match &self.creature {
            Some(creature) => html! {
                <figure class="creature">
                    if let Some(src) = &creature.sprite_url {
                        <img src={src.clone()} alt={creature.display_name()}/>
                    }
                    <figcaption>
                        {creature.display_name()}
                        <small>{creature.types.join(" / ")}</small>
                    </figcaption>
                </figure>
            },
            None => html! {
                <figure class={classes!("creature", "placeholder", self.loading.then_some("loading"))}>
                    <figcaption>{"???"}</figcaption>
                </figure>
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_ignores_trailing_slash() {
        assert_eq!(
            creature_url("https://pokeapi.co/api/v2/", 25),
            "https://pokeapi.co/api/v2/pokemon/25"
        );
        assert_eq!(creature_url("http://localhost", 1), "http://localhost/pokemon/1");
    }
}
