use super::{ItemView, RenderContext, View};
use crate::entity::Cid;
use crate::observer::{SubscriberId, Subscriptions, Topic};
use crate::template::Template;

/// The vehicle list. Every collection notification rebuilds all rows in
/// collection order.
#[derive(Debug)]
pub struct ListView {
    template: Template,
    items: Vec<ItemView>,
    active: Option<Cid>,
    renders: usize,
}

impl ListView {
    pub fn new(template: Template, subscriptions: &mut Subscriptions) -> Self {
        subscriptions.subscribe(Topic::Collection, SubscriberId::List);
        Self {
            template,
            items: Vec::new(),
            active: None,
            renders: 0,
        }
    }

    pub fn items(&self) -> &[ItemView] {
        &self.items
    }

    pub fn item(&self, cid: Cid) -> Option<&ItemView> {
        self.items.iter().find(|item| item.cid() == cid)
    }

    /// Re-renders a single row after its vehicle changed.
    pub fn render_item(&mut self, cid: Cid, ctx: &mut RenderContext<'_>) {
        if let Some(item) = self.items.iter_mut().find(|item| item.cid() == cid) {
            item.render(ctx);
        }
    }

    /// Marks `cid` as the active row and every other row inactive.
    pub fn activate(&mut self, cid: Cid) {
        self.active = Some(cid);
        for item in &mut self.items {
            item.set_active(item.cid() == cid);
        }
    }

    pub fn deactivate_all(&mut self) {
        self.active = None;
        for item in &mut self.items {
            item.set_active(false);
        }
    }

    pub fn active(&self) -> Option<Cid> {
        self.active
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl View for ListView {
    fn subscriber(&self) -> SubscriberId {
        SubscriberId::List
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) {
        ctx.subscriptions
            .unsubscribe_where(|subscriber| matches!(subscriber, SubscriberId::Item(_)));

        let collection = ctx.models.collection;
        let mut items = Vec::with_capacity(collection.len());
        for vehicle in collection.iter() {
            let mut item = ItemView::new(vehicle.cid(), self.template.clone(), ctx.subscriptions);
            item.render(ctx);
            item.set_active(self.active == Some(vehicle.cid()));
            items.push(item);
        }
        if !items.iter().any(ItemView::is_active) {
            self.active = None;
        }
        self.items = items;
        self.renders += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::VehicleCollection;
    use crate::entity::{CommandCenter, EntityKey, VehicleRecord};
    use crate::views::ModelSet;

    fn loaded() -> VehicleCollection {
        let mut collection = VehicleCollection::new("/api/vehicles.json");
        let request = collection.begin_fetch(true);
        collection.complete_fetch(
            &request,
            vec![
                VehicleRecord::new(1, 10.0, 20.0, Some(80.0)),
                VehicleRecord::new(2, -5.0, 100.0, Some(30.0)),
            ],
        );
        collection
    }

    #[test]
    fn rebuild_keeps_active_row_and_resubscribes_items() {
        let collection = loaded();
        let home = CommandCenter::default();
        let mut subscriptions = Subscriptions::default();
        let mut list = ListView::new(Template::parse("{{id}}").unwrap(), &mut subscriptions);
        let models = ModelSet {
            collection: &collection,
            command_center: &home,
        };

        list.render(&mut RenderContext {
            models,
            subscriptions: &mut subscriptions,
        });
        let second = list.items()[1].cid();
        list.activate(second);
        list.render(&mut RenderContext {
            models,
            subscriptions: &mut subscriptions,
        });

        let contents: Vec<_> = list.items().iter().map(ItemView::content).collect();
        assert_eq!(contents, vec!["1", "2"]);
        assert_eq!(list.active(), Some(second));
        assert!(list.item(second).is_some_and(ItemView::is_active));
        assert!(subscriptions.is_subscribed(
            Topic::Entity(EntityKey::Vehicle(second)),
            SubscriberId::Item(second)
        ));
        assert_eq!(list.render_count(), 2);
    }
}
