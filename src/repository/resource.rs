//! Generic typed CRUD over one REST collection

use std::{fmt::Display, marker::PhantomData};

use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use super::client::{cache_buster, ApiClient};
use crate::{
    error::{AppError, AppResult},
    models::{
        Author, Book, BookCopy, Category, CheckOut, Notification, Page, PageRequest,
        PatronAccount, Publisher, WaitList,
    },
};

/// Largest page requested when a whole collection is needed (selectors)
const LIST_ALL_PAGE_SIZE: u32 = 100;

/// An entity the backend exposes as a REST collection
pub trait Entity: Serialize + DeserializeOwned + Validate + Send + Sync + 'static {
    /// Path segment identifying the stored entity, `None` before creation
    fn key(&self) -> Option<String>;
}

pub struct RestResource<T> {
    pub(crate) client: ApiClient,
    path: &'static str,
    search_path: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for RestResource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path,
            search_path: self.search_path,
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> RestResource<T> {
    pub fn new(client: ApiClient, path: &'static str, search_path: &'static str) -> Self {
        Self {
            client,
            path,
            search_path,
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub(crate) fn item_path(&self, id: impl Display) -> String {
        format!("{}/{}", self.path, id)
    }

    pub(crate) fn require_key(&self, entity: &T) -> AppResult<String> {
        entity
            .key()
            .ok_or_else(|| AppError::Validation(format!("Invalid id for {}", self.path)))
    }

    /// List one page
    pub async fn list(&self, page: &PageRequest) -> AppResult<Page<T>> {
        let mut query = page.query_pairs();
        query.push(cache_buster());
        self.client.get_page(self.path, &query).await
    }

    /// Walk every page and collect the whole collection
    pub async fn list_all(&self) -> AppResult<Vec<T>> {
        let mut request = PageRequest {
            size: LIST_ALL_PAGE_SIZE,
            ..Default::default()
        };
        let mut items = Vec::new();
        loop {
            let page = self.list(&request).await?;
            let received = page.items.len();
            items.extend(page.items);
            if received == 0 || items.len() as u64 >= page.total_items {
                break;
            }
            request.page += 1;
        }
        Ok(items)
    }

    pub async fn get(&self, id: impl Display + Send) -> AppResult<T> {
        self.client.get_json(&self.item_path(id), &[]).await
    }

    pub async fn create(&self, entity: &T) -> AppResult<T> {
        entity.validate()?;
        if entity.key().is_some() {
            return Err(AppError::Validation(format!(
                "A new entity for {} cannot already have an id",
                self.path
            )));
        }
        let created: T = self.client.post_json(self.path, entity).await?;
        tracing::info!("Created {} {:?}", self.path, created.key());
        Ok(created)
    }

    /// POST a creation body that is not the entity itself
    pub async fn submit<B>(&self, body: &B) -> AppResult<T>
    where
        B: Serialize + Sync + ?Sized,
    {
        let created: T = self.client.post_json(self.path, body).await?;
        tracing::info!("Created {} {:?}", self.path, created.key());
        Ok(created)
    }

    pub async fn update(&self, entity: &T) -> AppResult<T> {
        entity.validate()?;
        let key = self.require_key(entity)?;
        self.client.put_json(&self.item_path(key), entity).await
    }

    /// PATCH with merge semantics: absent fields are left untouched
    pub async fn partial_update(&self, entity: &T) -> AppResult<T> {
        let key = self.require_key(entity)?;
        self.client.patch_json(&self.item_path(key), entity).await
    }

    pub async fn delete(&self, id: impl Display + Send) -> AppResult<()> {
        let path = self.item_path(id);
        self.client.delete(&path).await?;
        tracing::info!("Deleted {}", path);
        Ok(())
    }

    pub async fn search(&self, query: &str, page: &PageRequest) -> AppResult<Page<T>> {
        let mut params = vec![("query", query.to_string())];
        params.extend(page.query_pairs());
        self.client.get_page(self.search_path, &params).await
    }
}

macro_rules! numeric_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entity for $ty {
                fn key(&self) -> Option<String> {
                    self.id.map(|id| id.to_string())
                }
            }
        )+
    };
}

numeric_entity!(Author, Book, BookCopy, Category, CheckOut, Notification, Publisher, WaitList);

impl Entity for PatronAccount {
    fn key(&self) -> Option<String> {
        let card = self.card_number.trim();
        (!card.is_empty()).then(|| card.to_string())
    }
}
