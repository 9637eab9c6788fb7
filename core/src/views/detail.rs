use super::{RenderContext, View};
use crate::entity::EntityKey;
use crate::observer::{SubscriberId, Subscriptions, Topic};
use crate::template::Template;

/// What the detail panel is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailSubject {
    Entity(EntityKey),
    /// A route named a vehicle id the collection does not contain.
    Missing(String),
}

#[derive(Debug)]
pub struct DetailView {
    template: Template,
    subject: DetailSubject,
    content: String,
    renders: usize,
}

impl DetailView {
    pub fn new(key: EntityKey, template: Template, subscriptions: &mut Subscriptions) -> Self {
        subscriptions.subscribe(Topic::Entity(key), SubscriberId::Detail);
        Self {
            template,
            subject: DetailSubject::Entity(key),
            content: String::new(),
            renders: 0,
        }
    }

    /// Rebinds the panel and renders it. The change subscription moves with
    /// the binding so later edits to the new subject re-render the panel.
    pub fn set_model(&mut self, subject: DetailSubject, ctx: &mut RenderContext<'_>) {
        if let DetailSubject::Entity(previous) = &self.subject {
            ctx.subscriptions
                .unsubscribe(Topic::Entity(*previous), SubscriberId::Detail);
        }
        if let DetailSubject::Entity(next) = &subject {
            ctx.subscriptions
                .subscribe(Topic::Entity(*next), SubscriberId::Detail);
        }
        self.subject = subject;
        self.render(ctx);
    }

    pub fn subject(&self) -> &DetailSubject {
        &self.subject
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl View for DetailView {
    fn subscriber(&self) -> SubscriberId {
        SubscriberId::Detail
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        self.content = match &self.subject {
            DetailSubject::Entity(key) => match ctx.models.attributes(*key) {
                Some(attributes) => self.template.render(&attributes),
                None => "Selection is no longer available".to_string(),
            },
            DetailSubject::Missing(id) => format!("Vehicle {id} not found"),
        };
        self.renders += 1;
    }
}
