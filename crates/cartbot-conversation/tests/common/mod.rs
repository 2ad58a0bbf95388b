//! Test doubles shared by the conversation integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use cartbot_commerce::{Brand, BrandPage, CommerceClient, Department, Product, Service};
use cartbot_conversation::{Conversation, ConversationConfig};
use cartbot_core::{CartbotError, CartbotResult, Location};
use cartbot_messenger::{Dispatcher, OutboundMessage, SenderAction};
use cartbot_session::{KeyValueStore, MemoryStore, SessionStore};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::Instant;

/// A catalog call as seen by [`MockCommerce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Services(Location),
    Brands(String, u32, Location),
    Departments(String, Location),
    Products(String),
    Search(String, String),
}

/// Canned catalog that records every call.
#[derive(Default)]
pub struct MockCommerce {
    pub calls: Mutex<Vec<Call>>,
    pub services: Vec<Service>,
    pub brands: Vec<Brand>,
    pub departments: Vec<Department>,
    pub products: Vec<Product>,
    pub fail_with: Option<String>,
}

impl MockCommerce {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) -> CartbotResult<()> {
        self.calls.lock().push(call);
        match &self.fail_with {
            Some(msg) => Err(CartbotError::Commerce(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CommerceClient for MockCommerce {
    async fn services(&self, location: &Location) -> CartbotResult<Vec<Service>> {
        self.record(Call::Services(*location))?;
        Ok(self.services.clone())
    }

    async fn brands(&self, service_type: &str, page: u32, location: &Location) -> CartbotResult<BrandPage> {
        self.record(Call::Brands(service_type.to_string(), page, *location))?;
        Ok(BrandPage {
            brands: self.brands.clone(),
            ..BrandPage::default()
        })
    }

    async fn departments(&self, store_id: &str, location: &Location) -> CartbotResult<Vec<Department>> {
        self.record(Call::Departments(store_id.to_string(), *location))?;
        Ok(self.departments.clone())
    }

    async fn products(&self, department_id: &str) -> CartbotResult<Vec<Product>> {
        self.record(Call::Products(department_id.to_string()))?;
        Ok(self.products.clone())
    }

    async fn search_products(&self, store_id: &str, query: &str) -> CartbotResult<Vec<Product>> {
        self.record(Call::Search(store_id.to_string(), query.to_string()))?;
        Ok(self.products.clone())
    }
}

/// What a [`RecordingDispatcher`] was asked to send, with the (tokio) time.
#[derive(Debug, Clone)]
pub enum Sent {
    Action(String, SenderAction, Instant),
    Message(String, OutboundMessage, Instant),
}

#[derive(Default)]
pub struct RecordingDispatcher {
    pub sent: Mutex<Vec<Sent>>,
    pub fail: bool,
}

impl RecordingDispatcher {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Message(_, m, _) => Some(m),
                Sent::Action(..) => None,
            })
            .collect()
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn send_action(&self, recipient_id: &str, action: SenderAction) -> CartbotResult<()> {
        self.sent
            .lock()
            .push(Sent::Action(recipient_id.to_string(), action, Instant::now()));
        if self.fail {
            return Err(CartbotError::Messenger("Facebook error: boom".into()));
        }
        Ok(())
    }

    async fn send_message(&self, recipient_id: &str, message: &OutboundMessage) -> CartbotResult<()> {
        self.sent.lock().push(Sent::Message(
            recipient_id.to_string(),
            message.clone(),
            Instant::now(),
        ));
        if self.fail {
            return Err(CartbotError::Messenger("Facebook error: boom".into()));
        }
        Ok(())
    }
}

/// A store whose every operation fails.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> CartbotResult<Option<String>> {
        Err(CartbotError::Session("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> CartbotResult<()> {
        Err(CartbotError::Session("connection refused".into()))
    }
}

pub fn config() -> ConversationConfig {
    ConversationConfig {
        login_url: "https://shop.example/login".into(),
        image_base_url: "https://assets.example/img/".into(),
    }
}

pub struct Harness {
    pub kv: Arc<MemoryStore>,
    pub sessions: SessionStore,
    pub commerce: Arc<MockCommerce>,
    pub conversation: Conversation,
}

pub fn harness(commerce: MockCommerce) -> Harness {
    let kv = Arc::new(MemoryStore::new());
    let sessions = SessionStore::new(kv.clone());
    let commerce = Arc::new(commerce);
    let conversation = Conversation::new(commerce.clone(), sessions.clone(), &config());
    Harness {
        kv,
        sessions,
        commerce,
        conversation,
    }
}

pub fn taipei() -> Location {
    Location::new(25.047571, 121.577812)
}

pub fn service(service_type: &str, available: bool) -> Service {
    Service {
        service_type: service_type.into(),
        available,
    }
}

pub fn brand(name: &str, service_type: &str, store_id: i64) -> Brand {
    Brand {
        name: name.into(),
        service_type: service_type.into(),
        store_id,
        ..Brand::default()
    }
}

pub fn department(id: i64, name: &str) -> Department {
    Department {
        id,
        name: name.into(),
        ..Department::default()
    }
}

pub fn product(id: i64, title: &str, status: &str) -> Product {
    Product {
        id,
        title: title.into(),
        product_brand: "Orchard".into(),
        size: "1kg".into(),
        price: "120".into(),
        image_url_basename: format!("{id}.jpg"),
        status: status.into(),
        ..Product::default()
    }
}

pub fn text_of(message: &OutboundMessage) -> &str {
    match message {
        OutboundMessage::Text { text } => text,
        other => panic!("expected text reply, got {other:?}"),
    }
}
