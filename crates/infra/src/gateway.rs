//! In-memory persistence gateway.
//!
//! One `RwLock` guards all tables, so a commit validates and applies its
//! mutations under a single write guard: either every pending mutation
//! lands or none does. The relational rules of the persisted schema are
//! enforced here — foreign keys (restrict on delete), the composite
//! line-item key, the positive-quantity check, and per-row optimistic
//! versions.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use orderdesk_core::{
    CategoryId, CustomerId, Entity, OrderId, ProductId, StoreError, StoreResult,
};
use orderdesk_customers::{Customer, CustomerStore, NewCustomer};
use orderdesk_orders::{LineItem, Order, OrderGateway, OrderMutation, OrderStatus, OrderUnitOfWork};
use orderdesk_products::{CatalogStore, Category, NewCategory, NewProduct, Product};

/// Generic table keyed by entity id.
#[derive(Debug)]
struct Table<E: Entity> {
    rows: BTreeMap<E::Id, E>,
}

impl<E: Entity> Default for Table<E>
where
    E::Id: Ord,
{
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<E: Entity + Clone> Table<E>
where
    E::Id: Ord + Copy,
{
    fn get(&self, id: E::Id) -> Option<E> {
        self.rows.get(&id).cloned()
    }

    fn contains(&self, id: E::Id) -> bool {
        self.rows.contains_key(&id)
    }

    fn list(&self) -> Vec<E> {
        self.rows.values().cloned().collect()
    }

    fn iter(&self) -> impl Iterator<Item = &E> {
        self.rows.values()
    }

    fn insert(&mut self, row: E) {
        self.rows.insert(*row.id(), row);
    }

    fn remove(&mut self, id: E::Id) -> Option<E> {
        self.rows.remove(&id)
    }
}

#[derive(Debug, Default)]
struct Database {
    categories: Table<Category>,
    customers: Table<Customer>,
    products: Table<Product>,
    orders: Table<Order>,
    /// Composite primary key: (order id, product id).
    line_items: BTreeMap<(OrderId, ProductId), LineItem>,
}

impl Database {
    fn line_items_of(&self, id: OrderId) -> Vec<LineItem> {
        let lo = (id, ProductId::from_i64(i64::MIN));
        let hi = (id, ProductId::from_i64(i64::MAX));
        self.line_items.range(lo..=hi).map(|(_, v)| *v).collect()
    }

    fn drop_line_items_of(&mut self, id: OrderId) {
        self.line_items.retain(|(order_id, _), _| *order_id != id);
    }
}

/// Sequences for store-generated ids.
///
/// Allocation is lock-free so an id can be handed out before its row
/// commits; failed commits leave gaps, which is fine.
#[derive(Debug)]
struct Sequences {
    category: AtomicI64,
    customer: AtomicI64,
    product: AtomicI64,
    order: AtomicI64,
}

impl Sequences {
    fn new() -> Self {
        Self {
            category: AtomicI64::new(1),
            customer: AtomicI64::new(1),
            product: AtomicI64::new(1),
            order: AtomicI64::new(1),
        }
    }

    fn next(seq: &AtomicI64) -> i64 {
        seq.fetch_add(1, Ordering::Relaxed)
    }
}

/// The shared store behind every port.
#[derive(Debug)]
pub struct InMemoryGateway {
    db: RwLock<Database>,
    seq: Sequences,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            db: RwLock::new(Database::default()),
            seq: Sequences::new(),
        }
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn write_guard(
    lock: &RwLock<Database>,
) -> StoreResult<std::sync::RwLockWriteGuard<'_, Database>> {
    lock.write()
        .map_err(|_| StoreError::Conflict("store lock poisoned".to_string()))
}

impl CustomerStore for InMemoryGateway {
    fn customer(&self, id: CustomerId) -> Option<Customer> {
        self.db.read().ok()?.customers.get(id)
    }

    fn customers(&self) -> Vec<Customer> {
        self.db
            .read()
            .map(|db| db.customers.list())
            .unwrap_or_default()
    }

    fn add_customer(&self, new: NewCustomer) -> Customer {
        let customer = Customer {
            id: CustomerId::from_i64(Sequences::next(&self.seq.customer)),
            name: new.name,
            address: new.address,
            phone: new.phone,
        };
        if let Ok(mut db) = self.db.write() {
            db.customers.insert(customer.clone());
        }
        customer
    }

    fn update_customer(&self, customer: Customer) -> StoreResult<()> {
        let mut db = write_guard(&self.db)?;
        if !db.customers.contains(customer.id) {
            return Err(StoreError::NotFound {
                entity: "customer",
                id: customer.id.as_i64(),
            });
        }
        db.customers.insert(customer);
        Ok(())
    }

    fn remove_customer(&self, id: CustomerId) -> StoreResult<()> {
        let mut db = write_guard(&self.db)?;
        if !db.customers.contains(id) {
            return Err(StoreError::NotFound {
                entity: "customer",
                id: id.as_i64(),
            });
        }
        if db.orders.iter().any(|o| o.customer_id == id) {
            return Err(StoreError::ForeignKey(format!(
                "customer {id} is referenced by existing orders"
            )));
        }
        db.customers.remove(id);
        Ok(())
    }
}

impl CatalogStore for InMemoryGateway {
    fn category(&self, id: CategoryId) -> Option<Category> {
        self.db.read().ok()?.categories.get(id)
    }

    fn categories(&self) -> Vec<Category> {
        self.db
            .read()
            .map(|db| db.categories.list())
            .unwrap_or_default()
    }

    fn add_category(&self, new: NewCategory) -> Category {
        let category = Category {
            id: CategoryId::from_i64(Sequences::next(&self.seq.category)),
            name: new.name,
        };
        if let Ok(mut db) = self.db.write() {
            db.categories.insert(category.clone());
        }
        category
    }

    fn update_category(&self, category: Category) -> StoreResult<()> {
        let mut db = write_guard(&self.db)?;
        if !db.categories.contains(category.id) {
            return Err(StoreError::NotFound {
                entity: "category",
                id: category.id.as_i64(),
            });
        }
        db.categories.insert(category);
        Ok(())
    }

    fn remove_category(&self, id: CategoryId) -> StoreResult<()> {
        let mut db = write_guard(&self.db)?;
        if !db.categories.contains(id) {
            return Err(StoreError::NotFound {
                entity: "category",
                id: id.as_i64(),
            });
        }
        if db.products.iter().any(|p| p.category_id == id) {
            return Err(StoreError::ForeignKey(format!(
                "category {id} is referenced by existing products"
            )));
        }
        db.categories.remove(id);
        Ok(())
    }

    fn product(&self, id: ProductId) -> Option<Product> {
        self.db.read().ok()?.products.get(id)
    }

    fn products(&self) -> Vec<Product> {
        self.db
            .read()
            .map(|db| db.products.list())
            .unwrap_or_default()
    }

    fn add_product(&self, new: NewProduct) -> StoreResult<Product> {
        let mut db = write_guard(&self.db)?;
        if !db.categories.contains(new.category_id) {
            return Err(StoreError::ForeignKey(format!(
                "category {} does not exist",
                new.category_id
            )));
        }
        let product = Product {
            id: ProductId::from_i64(Sequences::next(&self.seq.product)),
            name: new.name,
            price: new.price,
            category_id: new.category_id,
        };
        db.products.insert(product.clone());
        Ok(product)
    }

    fn update_product(&self, product: Product) -> StoreResult<()> {
        let mut db = write_guard(&self.db)?;
        if !db.products.contains(product.id) {
            return Err(StoreError::NotFound {
                entity: "product",
                id: product.id.as_i64(),
            });
        }
        if !db.categories.contains(product.category_id) {
            return Err(StoreError::ForeignKey(format!(
                "category {} does not exist",
                product.category_id
            )));
        }
        db.products.insert(product);
        Ok(())
    }

    fn remove_product(&self, id: ProductId) -> StoreResult<()> {
        let mut db = write_guard(&self.db)?;
        if !db.products.contains(id) {
            return Err(StoreError::NotFound {
                entity: "product",
                id: id.as_i64(),
            });
        }
        if db.line_items.keys().any(|(_, product_id)| *product_id == id) {
            return Err(StoreError::ForeignKey(format!(
                "product {id} is referenced by existing line items"
            )));
        }
        db.products.remove(id);
        Ok(())
    }
}

impl OrderGateway for InMemoryGateway {
    fn next_order_id(&self) -> OrderId {
        OrderId::from_i64(Sequences::next(&self.seq.order))
    }

    fn order(&self, id: OrderId) -> Option<Order> {
        self.db.read().ok()?.orders.get(id)
    }

    fn orders(&self) -> Vec<Order> {
        self.db
            .read()
            .map(|db| db.orders.list())
            .unwrap_or_default()
    }

    fn orders_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.db
            .read()
            .map(|db| {
                db.orders
                    .iter()
                    .filter(|o| o.status == status)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn line_items(&self, id: OrderId) -> Vec<LineItem> {
        self.db
            .read()
            .map(|db| db.line_items_of(id))
            .unwrap_or_default()
    }

    fn product(&self, id: ProductId) -> Option<Product> {
        self.db.read().ok()?.products.get(id)
    }

    fn commit(&self, uow: OrderUnitOfWork) -> StoreResult<()> {
        let mut db = write_guard(&self.db)?;
        validate(&db, uow.mutations())?;
        apply(&mut db, uow.into_mutations());
        Ok(())
    }
}

/// Validation pass over a unit of work. Runs against the current tables plus
/// the batch's own pending effects (an inserted order satisfies the foreign
/// key of a line item later in the same batch), so validation sees exactly
/// the state `apply` will produce.
fn validate(db: &Database, mutations: &[OrderMutation]) -> StoreResult<()> {
    use std::collections::BTreeSet;

    let mut inserted_orders: BTreeSet<OrderId> = BTreeSet::new();
    let mut removed_orders: BTreeSet<OrderId> = BTreeSet::new();
    let mut cleared_orders: BTreeSet<OrderId> = BTreeSet::new();
    let mut new_lines: BTreeSet<(OrderId, ProductId)> = BTreeSet::new();

    for mutation in mutations {
        match mutation {
            OrderMutation::InsertOrder(order) => {
                if db.orders.contains(order.id) || inserted_orders.contains(&order.id) {
                    return Err(StoreError::Duplicate(format!(
                        "order {} already exists",
                        order.id
                    )));
                }
                if !db.customers.contains(order.customer_id) {
                    return Err(StoreError::ForeignKey(format!(
                        "customer {} does not exist",
                        order.customer_id
                    )));
                }
                inserted_orders.insert(order.id);
            }
            OrderMutation::UpdateOrder { order, expected } => {
                let current = db.orders.get(order.id).ok_or(StoreError::NotFound {
                    entity: "order",
                    id: order.id.as_i64(),
                })?;
                expected.check(current.version)?;
                if !db.customers.contains(order.customer_id) {
                    return Err(StoreError::ForeignKey(format!(
                        "customer {} does not exist",
                        order.customer_id
                    )));
                }
            }
            OrderMutation::RemoveOrder { id, expected } => {
                let current = db.orders.get(*id).ok_or(StoreError::NotFound {
                    entity: "order",
                    id: id.as_i64(),
                })?;
                expected.check(current.version)?;
                removed_orders.insert(*id);
            }
            OrderMutation::ClearLineItems(id) => {
                cleared_orders.insert(*id);
            }
            OrderMutation::InsertLineItem(item) => {
                item.check()?;
                let order_present = inserted_orders.contains(&item.order_id)
                    || (db.orders.contains(item.order_id)
                        && !removed_orders.contains(&item.order_id));
                if !order_present {
                    return Err(StoreError::ForeignKey(format!(
                        "order {} does not exist",
                        item.order_id
                    )));
                }
                if !db.products.contains(item.product_id) {
                    return Err(StoreError::ForeignKey(format!(
                        "product {} does not exist",
                        item.product_id
                    )));
                }
                let key = (item.order_id, item.product_id);
                let survives_in_store = db.line_items.contains_key(&key)
                    && !cleared_orders.contains(&item.order_id);
                if survives_in_store || new_lines.contains(&key) {
                    return Err(StoreError::Duplicate(format!(
                        "product {} appears more than once in order {}",
                        item.product_id, item.order_id
                    )));
                }
                new_lines.insert(key);
            }
        }
    }

    Ok(())
}

/// Apply pass: infallible once validation succeeded, still under the same
/// write guard.
fn apply(db: &mut Database, mutations: Vec<OrderMutation>) {
    for mutation in mutations {
        match mutation {
            OrderMutation::InsertOrder(order) | OrderMutation::UpdateOrder { order, .. } => {
                db.orders.insert(order);
            }
            OrderMutation::RemoveOrder { id, .. } => {
                db.orders.remove(id);
                // Cascade: the order exclusively owns its line items.
                db.drop_line_items_of(id);
            }
            OrderMutation::ClearLineItems(id) => {
                db.drop_line_items_of(id);
            }
            OrderMutation::InsertLineItem(item) => {
                db.line_items
                    .insert((item.order_id, item.product_id), item);
            }
        }
    }
}
