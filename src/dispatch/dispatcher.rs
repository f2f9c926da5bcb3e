use std::sync::Arc;

use anyhow::Result;

use crate::catalog::Catalog;
use crate::commands::{Command, CommandExtractor, QueryKind};
use crate::config::BotConfig;
use crate::domain::order::{LineItem, Order};
use crate::domain::report::{Report, ReportFields};
use crate::domain::subscriber::{ProfileField, Subscriber};
use crate::metrics::Metrics;
use crate::ports::{CheckoutCart, OrderStore, PaymentInitiator, ReportSink, SubscriberStore};
use crate::pricing::price_line_items;

use super::conversation::ConversationState;
use super::errors::CommandError;
use super::replies;

// ============================================================================
// Command Dispatcher
// ============================================================================
//
// Orchestrates: message -> commands -> per-command outcome -> one reply
//
// Every command is attempted, in extraction order. A failure becomes that
// command's line of the reply and never stops the commands after it.
//
// ============================================================================

/// Decides whether a subscriber may submit field reports
pub type ReportAuthorizer = Arc<dyn Fn(&Subscriber) -> bool + Send + Sync>;

/// Everything outside the core the dispatcher talks to
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<Catalog>,
    pub orders: Arc<dyn OrderStore>,
    pub subscribers: Arc<dyn SubscriberStore>,
    pub reports: Arc<dyn ReportSink>,
    pub payments: Arc<dyn PaymentInitiator>,
    pub report_authorizer: ReportAuthorizer,
    pub metrics: Option<Arc<Metrics>>,
}

impl Services {
    /// Services with the default authorizer (verified subscribers only) and no metrics
    pub fn new(
        catalog: Arc<Catalog>,
        orders: Arc<dyn OrderStore>,
        subscribers: Arc<dyn SubscriberStore>,
        reports: Arc<dyn ReportSink>,
        payments: Arc<dyn PaymentInitiator>,
    ) -> Self {
        Self {
            catalog,
            orders,
            subscribers,
            reports,
            payments,
            report_authorizer: Arc::new(|subscriber: &Subscriber| subscriber.is_verified),
            metrics: None,
        }
    }

    pub fn with_authorizer(mut self, authorizer: ReportAuthorizer) -> Self {
        self.report_authorizer = authorizer;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

pub struct Dispatcher {
    services: Services,
    extractor: CommandExtractor,
    report_keyword: Option<String>,
    item_name_prefix: String,
}

impl Dispatcher {
    pub fn new(services: Services, config: &BotConfig) -> Result<Self, regex::Error> {
        let report_keyword = config.report_rule_keyword().map(str::to_string);
        Ok(Self {
            extractor: CommandExtractor::new(report_keyword.as_deref())?,
            services,
            report_keyword,
            item_name_prefix: config.checkout.item_name_prefix.clone(),
        })
    }

    pub fn extractor(&self) -> &CommandExtractor {
        &self.extractor
    }

    /// Load (or on first contact, create) the subscriber and their open order.
    pub async fn open_conversation(&self, subscriber_id: &str) -> Result<ConversationState> {
        let (subscriber, existed) = match self.services.subscribers.load_subscriber(subscriber_id).await? {
            Some(subscriber) => (subscriber, true),
            None => {
                let subscriber = Subscriber::new(subscriber_id);
                self.services.subscribers.insert_subscriber(&subscriber).await?;
                tracing::info!(subscriber = %subscriber_id, "New subscriber registered");
                (subscriber, false)
            }
        };

        let current_order = self.services.orders.load_open_order(subscriber_id).await?;

        Ok(ConversationState::new(subscriber, existed, current_order))
    }

    /// Full pipeline for one inbound message. Only store failures while
    /// opening the conversation are returned as errors; everything else is
    /// part of the reply.
    pub async fn respond(&self, subscriber_id: &str, message: &str) -> Result<String> {
        let mut state = self.open_conversation(subscriber_id).await?;
        let commands = self.extractor.extract(message);

        if let Some(metrics) = &self.services.metrics {
            metrics.messages_processed.inc();
        }

        let outcome = if commands.is_empty() {
            if let Some(metrics) = &self.services.metrics {
                metrics.messages_unrecognized.inc();
            }
            tracing::debug!(subscriber = %subscriber_id, "No command recognized");
            replies::NO_COMMAND.to_string()
        } else {
            let text = self.dispatch(&commands, &mut state).await;
            if text.trim().is_empty() {
                replies::COMMAND_FAILED.to_string()
            } else {
                text
            }
        };

        let reply = match (state.subscriber_existed, commands.is_empty()) {
            (false, true) => format!(
                "{}\n\n{}\n\n{}",
                replies::FIRST_CONTACT_GREETING,
                replies::EMAIL_REMINDER,
                replies::SAY_MENU
            ),
            (false, false) => format!(
                "{}\n\n{}\n\n{}\n\n{}",
                replies::FIRST_CONTACT_WITH_COMMANDS,
                outcome,
                replies::EMAIL_REMINDER,
                replies::SAY_MENU
            ),
            (true, true) => format!("{}\n\n{}", outcome, replies::SAY_MENU),
            (true, false) => outcome,
        };

        Ok(reply)
    }

    /// Execute every command against the conversation and join one line per
    /// command, in order.
    pub async fn dispatch(&self, commands: &[Command], state: &mut ConversationState) -> String {
        let mut lines = Vec::with_capacity(commands.len());

        for command in commands {
            let outcome = self.execute(command, state).await;

            if let Some(metrics) = &self.services.metrics {
                metrics.record_command(command.kind(), outcome.is_ok());
            }

            match outcome {
                Ok(text) => lines.push(text),
                Err(e) => {
                    tracing::warn!(
                        subscriber = %state.subscriber_id(),
                        kind = command.kind(),
                        raw = command.raw(),
                        error = %e,
                        "Command failed"
                    );
                    lines.push(e.to_string());
                }
            }
        }

        lines.join("\n")
    }

    async fn execute(&self, command: &Command, state: &mut ConversationState) -> Result<String, CommandError> {
        match command {
            Command::Query { kind, .. } => self.answer_query(*kind, state).await,
            Command::UpdateField { field, value, .. } => self.update_field(*field, value, state).await,
            Command::UpdateOrder { items, .. } => {
                let items = items.clone()?;
                self.update_order(&items, state).await
            }
            Command::NewReport { fields, .. } => {
                let fields = fields.clone()?;
                self.submit_report(fields, state).await
            }
        }
    }

    async fn answer_query(&self, kind: QueryKind, state: &ConversationState) -> Result<String, CommandError> {
        match kind {
            QueryKind::Menu => Ok(replies::main_menu(self.report_keyword.as_deref())),
            QueryKind::Shop => Ok(format!(
                "{}\n\n{}",
                replies::shop_header(),
                self.services.catalog.render()
            )),
            QueryKind::UserInfo => Ok(state.subscriber.render()),
            QueryKind::CurrentOrder => Ok(state
                .current_order
                .as_ref()
                .map(Order::render)
                .unwrap_or_else(|| replies::NO_CURRENT_ORDER.to_string())),
            QueryKind::CheckoutNow => self.checkout(state).await,
        }
    }

    async fn update_field(
        &self,
        field: ProfileField,
        value: &str,
        state: &mut ConversationState,
    ) -> Result<String, CommandError> {
        let mut subscriber = state.subscriber.clone();
        subscriber
            .apply_field(field, value)
            .map_err(|source| CommandError::Profile { field, source })?;

        self.services
            .subscribers
            .save_subscriber(&subscriber)
            .await
            .map_err(CommandError::store("updating user info"))?;

        state.subscriber = subscriber;
        Ok(format!("successfully updated user info.{} to {}", field, value))
    }

    async fn update_order(&self, items: &[LineItem], state: &mut ConversationState) -> Result<String, CommandError> {
        let mut order = match &state.current_order {
            Some(order) => order.clone(),
            None => Order::open(state.subscriber_id(), self.services.catalog.id()),
        };
        order.apply_updates(items);

        self.services
            .orders
            .save_order(&order)
            .await
            .map_err(CommandError::store("updating order"))?;

        tracing::info!(
            subscriber = %state.subscriber_id(),
            order_id = %order.order_id,
            items = order.line_items.len(),
            "Order updated"
        );
        state.current_order = Some(order);
        Ok("successfully updated current order".to_string())
    }

    async fn submit_report(&self, fields: ReportFields, state: &ConversationState) -> Result<String, CommandError> {
        if !(self.services.report_authorizer)(&state.subscriber) {
            return Err(CommandError::NotAuthorized);
        }

        let report = Report::new(state.subscriber_id(), fields);
        self.services
            .reports
            .submit(&report)
            .await
            .map_err(CommandError::store("adding new report"))?;

        tracing::info!(
            subscriber = %state.subscriber_id(),
            report_id = %report.report_id,
            "Report submitted"
        );
        Ok("successfully added new report".to_string())
    }

    async fn checkout(&self, state: &ConversationState) -> Result<String, CommandError> {
        let order = match &state.current_order {
            Some(order) if !order.is_empty() => order,
            _ => return Err(CommandError::NoCurrentOrder),
        };

        let summary = price_line_items(&order.line_items, &self.services.catalog);
        if let Some(metrics) = &self.services.metrics {
            metrics.record_pricing_diagnostics(summary.diagnostics.len());
        }

        let cart = CheckoutCart {
            item_name: format!("{}{}", self.item_name_prefix, order.order_id),
            total: summary.total,
            order_id: order.order_id,
            first_name: state.subscriber.nickname.clone().unwrap_or_default(),
            last_name: state.subscriber_id().to_string(),
            email: state.subscriber.email.clone().unwrap_or_default(),
        };

        let redirect = self.services.payments.initiate(&cart).await;
        if let Some(metrics) = &self.services.metrics {
            metrics.record_checkout(redirect.is_ok());
        }
        let redirect = redirect?;

        let mut reply = format!("Order total: R{}", summary.total);
        if !summary.is_clean() {
            reply.push('\n');
            reply.push_str(&summary.diagnostics_text());
        }
        reply.push_str("\n\n");
        reply.push_str(&redirect);
        Ok(reply)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogItem, CatalogSelection, PricingRegime};
    use crate::config::CheckoutSettings;
    use crate::domain::report::TribeSize;
    use crate::ports::{
        InMemoryOrderStore, InMemoryReportSink, InMemorySubscriberStore, PaymentError,
        RedirectPaymentInitiator,
    };
    use async_trait::async_trait;

    const PHONE: &str = "27820000000";

    struct Harness {
        dispatcher: Dispatcher,
        orders: Arc<InMemoryOrderStore>,
        subscribers: Arc<InMemorySubscriberStore>,
        reports: Arc<InMemoryReportSink>,
        metrics: Arc<Metrics>,
    }

    fn catalog() -> Arc<Catalog> {
        let item = |item_id: u32, regime: PricingRegime, options: &[&str]| CatalogItem {
            catalog_id: "test".to_string(),
            item_id,
            name: format!("Item {}", item_id),
            regime,
            options: options.iter().map(|o| o.to_string()).collect(),
        };

        Arc::new(
            Catalog::new(
                "test",
                "Prices in Rand",
                vec![CatalogSelection::new(
                    "Stuff:",
                    vec![
                        item(1, PricingRegime::EnumeratedOption, &["Small @ R10", "Large @ R20"]),
                        item(2, PricingRegime::EnumeratedOption, &["Only @ R7"]),
                        item(3, PricingRegime::WeightTiered, &["100g @ R2"]),
                    ],
                )],
            )
            .unwrap(),
        )
    }

    fn harness_with(orders: Arc<dyn OrderStore>, in_memory_orders: Arc<InMemoryOrderStore>) -> Harness {
        let subscribers = Arc::new(InMemorySubscriberStore::new());
        let reports = Arc::new(InMemoryReportSink::new());
        let metrics = Arc::new(Metrics::new().unwrap());
        let payments = Arc::new(RedirectPaymentInitiator::new(CheckoutSettings {
            host_url: "https://pay.example.com/process".to_string(),
            ..CheckoutSettings::default()
        }));

        let services = Services::new(catalog(), orders, subscribers.clone(), reports.clone(), payments)
            .with_metrics(metrics.clone());

        Harness {
            dispatcher: Dispatcher::new(services, &BotConfig::default()).unwrap(),
            orders: in_memory_orders,
            subscribers,
            reports,
            metrics,
        }
    }

    fn harness() -> Harness {
        let orders = Arc::new(InMemoryOrderStore::new());
        harness_with(orders.clone(), orders)
    }

    async fn existing_subscriber(h: &Harness) -> Subscriber {
        let subscriber = Subscriber::new(PHONE);
        h.subscribers.insert_subscriber(&subscriber).await.unwrap();
        subscriber
    }

    async fn seeded_order(h: &Harness, items: &[(u32, &str)]) -> Order {
        let mut order = Order::open(PHONE, "test");
        order.line_items = items.iter().map(|(id, a)| LineItem::new(*id, *a)).collect();
        h.orders.save_order(&order).await.unwrap();
        order
    }

    #[tokio::test]
    async fn test_query_and_order_update_in_one_message() {
        let h = harness();
        existing_subscriber(&h).await;
        let order = seeded_order(&h, &[(3, "200")]).await;

        let reply = h.dispatcher.respond(PHONE, "menu? update order 1:1x2, 3:0").await.unwrap();

        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(lines[0], "Main Menu, command list:");
        assert_eq!(*lines.last().unwrap(), "successfully updated current order");

        let stored = h.orders.get(order.order_id).await.unwrap();
        assert_eq!(stored.line_items, vec![LineItem::new(1, "1x2")]);
    }

    #[tokio::test]
    async fn test_first_order_update_opens_order() {
        let h = harness();
        existing_subscriber(&h).await;

        h.dispatcher.respond(PHONE, "update order 1:2x1, 3:150").await.unwrap();

        let order = h.orders.load_open_order(PHONE).await.unwrap().unwrap();
        assert_eq!(order.catalog_id, "test");
        assert_eq!(
            order.line_items,
            vec![LineItem::new(1, "2x1"), LineItem::new(3, "150")]
        );
    }

    #[tokio::test]
    async fn test_failing_command_does_not_block_siblings() {
        let h = harness();
        existing_subscriber(&h).await;

        let reply = h
            .dispatcher
            .respond(PHONE, "update email: nope\nupdate nickname: bob\nupdate order 1:1x1, x:2")
            .await
            .unwrap();

        let lines: Vec<&str> = reply.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("error updating email"));
        assert_eq!(lines[1], "successfully updated user info.nickname to bob");
        assert!(lines[2].starts_with("error parsing update order command"));

        let subscriber = h.subscribers.load_subscriber(PHONE).await.unwrap().unwrap();
        assert_eq!(subscriber.nickname.as_deref(), Some("bob"));
        assert_eq!(subscriber.email, None);
        assert!(h.orders.load_open_order(PHONE).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dispatch_groups_commands_by_rule() {
        let h = harness();
        existing_subscriber(&h).await;
        let mut state = h.dispatcher.open_conversation(PHONE).await.unwrap();

        let commands = h.dispatcher.extractor().extract("currentorder? update order 2:1x3 currentorder?");
        let reply = h.dispatcher.dispatch(&commands, &mut state).await;

        // currentorder? answers run before the order update
        assert!(reply.starts_with("No current order.\nNo current order.\nerror parsing"));
        assert!(state.current_order.is_none());
    }

    #[tokio::test]
    async fn test_no_command_for_known_subscriber() {
        let h = harness();
        existing_subscriber(&h).await;

        let reply = h.dispatcher.respond(PHONE, "hello?").await.unwrap();
        assert_eq!(reply, format!("{}\n\n{}", replies::NO_COMMAND, replies::SAY_MENU));
        assert_eq!(h.metrics.messages_unrecognized.get(), 1);
    }

    #[tokio::test]
    async fn test_first_contact_without_command() {
        let h = harness();

        let reply = h.dispatcher.respond(PHONE, "hi").await.unwrap();
        assert!(reply.starts_with(replies::FIRST_CONTACT_GREETING));
        assert!(!reply.contains(replies::NO_COMMAND));
        assert!(h.subscribers.load_subscriber(PHONE).await.unwrap().is_some());

        let second = h.dispatcher.respond(PHONE, "hi").await.unwrap();
        assert!(second.starts_with(replies::NO_COMMAND));
    }

    #[tokio::test]
    async fn test_first_contact_with_command_keeps_results() {
        let h = harness();

        let reply = h.dispatcher.respond(PHONE, "update nickname: bob").await.unwrap();
        assert!(reply.starts_with(replies::FIRST_CONTACT_WITH_COMMANDS));
        assert!(reply.contains("successfully updated user info.nickname to bob"));
        assert!(reply.ends_with(replies::SAY_MENU));
    }

    #[tokio::test]
    async fn test_current_order_and_userinfo_queries() {
        let h = harness();
        existing_subscriber(&h).await;
        seeded_order(&h, &[(1, "2x3")]).await;

        let reply = h.dispatcher.respond(PHONE, "currentorder? userinfo?").await.unwrap();
        assert!(reply.contains("Order Items:\n1: 2x3,"));
        assert!(reply.contains("Your Nickname: Not set"));
    }

    #[tokio::test]
    async fn test_shop_lists_catalog() {
        let h = harness();
        existing_subscriber(&h).await;

        let reply = h.dispatcher.respond(PHONE, "shop?").await.unwrap();
        assert!(reply.contains("Prices in Rand\n\nStuff:\n1: Item 1\n   1. Small @ R10"));
    }

    #[tokio::test]
    async fn test_report_requires_verified_subscriber() {
        let h = harness();
        existing_subscriber(&h).await;

        let text = "new sighting: [12 oak ave], medium, high, [grazing]";
        let reply = h.dispatcher.respond(PHONE, text).await.unwrap();
        assert_eq!(reply, "subscriber not verified, permission denied");
        assert!(h.reports.reports().await.is_empty());

        let mut subscriber = h.subscribers.load_subscriber(PHONE).await.unwrap().unwrap();
        subscriber.is_verified = true;
        h.subscribers.save_subscriber(&subscriber).await.unwrap();

        let reply = h.dispatcher.respond(PHONE, text).await.unwrap();
        assert_eq!(reply, "successfully added new report");

        let reports = h.reports.reports().await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].subscriber_id, PHONE);
        assert_eq!(reports[0].fields.tribe_size, TribeSize::Medium);
    }

    #[tokio::test]
    async fn test_malformed_report_names_stage() {
        let h = harness();
        existing_subscriber(&h).await;

        let reply = h
            .dispatcher
            .respond(PHONE, "new sighting: [12 oak ave], medium, [grazing], extra")
            .await
            .unwrap();
        assert!(reply.starts_with("error parsing new report: expected tribe size and activity level, found 3"));
    }

    #[tokio::test]
    async fn test_checkout_without_order() {
        let h = harness();
        existing_subscriber(&h).await;

        let reply = h.dispatcher.respond(PHONE, "checkoutnow?").await.unwrap();
        assert!(reply.starts_with("no current order"));
    }

    #[tokio::test]
    async fn test_checkout_prices_and_redirects() {
        let h = harness();
        existing_subscriber(&h).await;
        seeded_order(&h, &[(1, "1x5"), (2, "1x2"), (42, "1x1")]).await;

        let reply = h.dispatcher.respond(PHONE, "checkoutnow?").await.unwrap();

        assert!(reply.starts_with("Order total: R64\n"));
        assert!(reply.contains("item number 42 not found in price list"));
        assert!(reply.contains("https://pay.example.com/process?"));
        assert!(reply.contains("amount=64.00"));
        assert_eq!(h.metrics.pricing_diagnostics.get(), 1);
    }

    #[tokio::test]
    async fn test_checkout_gateway_failure_is_reported() {
        struct DownGateway;

        #[async_trait]
        impl PaymentInitiator for DownGateway {
            async fn initiate(&self, _cart: &CheckoutCart) -> Result<String, PaymentError> {
                Err(PaymentError::Declined("merchant suspended".to_string()))
            }
        }

        let orders = Arc::new(InMemoryOrderStore::new());
        let subscribers = Arc::new(InMemorySubscriberStore::new());
        let services = Services::new(
            catalog(),
            orders.clone(),
            subscribers.clone(),
            Arc::new(InMemoryReportSink::new()),
            Arc::new(DownGateway),
        );
        let dispatcher = Dispatcher::new(services, &BotConfig::default()).unwrap();

        subscribers.insert_subscriber(&Subscriber::new(PHONE)).await.unwrap();
        let mut order = Order::open(PHONE, "test");
        order.line_items.push(LineItem::new(1, "1x1"));
        orders.save_order(&order).await.unwrap();

        let reply = dispatcher.respond(PHONE, "checkoutnow?").await.unwrap();
        assert_eq!(reply, "Checkout initiation failed: merchant suspended");
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_in_reply() {
        struct FullDisk;

        #[async_trait]
        impl OrderStore for FullDisk {
            async fn load_open_order(&self, _subscriber_id: &str) -> Result<Option<Order>> {
                Ok(None)
            }

            async fn save_order(&self, _order: &Order) -> Result<()> {
                anyhow::bail!("disk full")
            }
        }

        let h = harness_with(Arc::new(FullDisk), Arc::new(InMemoryOrderStore::new()));
        existing_subscriber(&h).await;

        let reply = h.dispatcher.respond(PHONE, "update order 1:1x1\nmenu?").await.unwrap();
        assert!(reply.starts_with("Main Menu"));
        assert!(reply.ends_with("unhandled error updating order: disk full"));

        let gathered = h.metrics.registry().gather();
        let failed = gathered
            .iter()
            .find(|m| m.name() == "orderbot_commands_failed_total")
            .unwrap();
        assert_eq!(failed.metric[0].counter.value, Some(1.0));

        // menu? and the order update both ran, under separate kind labels
        let executed = gathered
            .iter()
            .find(|m| m.name() == "orderbot_commands_executed_total")
            .unwrap();
        assert_eq!(executed.metric.len(), 2);
    }

    #[tokio::test]
    async fn test_new_order_belongs_to_conversation_subscriber() {
        let h = harness();
        existing_subscriber(&h).await;
        let mut state = h.dispatcher.open_conversation(PHONE).await.unwrap();
        assert_eq!(state.subscriber_id(), PHONE);

        let commands = h.dispatcher.extractor().extract("update order 2:1x1");
        h.dispatcher.dispatch(&commands, &mut state).await;

        let order = state.current_order.unwrap();
        assert_eq!(order.subscriber_id, PHONE);
        assert_eq!(h.orders.get(order.order_id).await.unwrap().line_items, order.line_items);
    }

    #[tokio::test]
    async fn test_custom_authorizer() {
        let orders = Arc::new(InMemoryOrderStore::new());
        let reports = Arc::new(InMemoryReportSink::new());
        let services = Services::new(
            catalog(),
            orders,
            Arc::new(InMemorySubscriberStore::new()),
            reports.clone(),
            Arc::new(RedirectPaymentInitiator::new(CheckoutSettings::default())),
        )
        .with_authorizer(Arc::new(|_: &Subscriber| true));
        let dispatcher = Dispatcher::new(services, &BotConfig::default()).unwrap();

        let reply = dispatcher
            .respond(PHONE, "new sighting [a], 1, 3, [b]")
            .await
            .unwrap();
        assert!(reply.contains("successfully added new report"));
        assert_eq!(reports.reports().await.len(), 1);
    }
}
