use chrono::Utc;

use shopfront_browse::{
    BrowseSession, BrowseSessionCommand, ClampPage, DisplayMode, NextPage, PreviousPage,
    SelectCategory, SelectPage, StartSession, page_count, paginate,
};
use shopfront_cart::{AddProduct, Cart, CartCommand, ChangeQuantity, ClearCart, RemoveProduct};
use shopfront_catalog::{
    CategoryId, Product, ProductId, products_in_category, represented_categories, search_by_name,
};
use shopfront_compare::{
    AddToCompare, ClearCompare, CompareTray, CompareTrayCommand, RemoveFromCompare,
};
use shopfront_core::{DomainError, DomainResult, SessionId};
use shopfront_events::{Event, execute};

use crate::page::{CartSummary, CatalogPage, CategoryTab};
use crate::snapshot::Snapshot;

/// The external state holder, made concrete.
///
/// Owns the catalog snapshot, the selection session, the comparison tray, and
/// the cart. Every interaction dispatches a command through the handle/apply
/// lifecycle and reports how many events were committed; [`Storefront::page`]
/// recomputes the view model from current state and is the only read path.
///
/// This is also the subsystem's impure boundary: commands are stamped with
/// wall-clock time here, and committed events are logged here. Everything
/// below it stays deterministic.
#[derive(Debug)]
pub struct Storefront {
    session_id: SessionId,
    snapshot: Snapshot,
    session: BrowseSession,
    tray: CompareTray,
    cart: Cart,
    mode: DisplayMode,
    search: String,
}

impl Storefront {
    /// Open a storefront over a snapshot, landing on the given category.
    pub fn open(
        snapshot: Snapshot,
        default_category: CategoryId,
        mode: DisplayMode,
    ) -> DomainResult<Self> {
        let session_id = SessionId::new();
        let mut session = BrowseSession::empty(session_id);
        let events = execute(
            &mut session,
            &BrowseSessionCommand::StartSession(StartSession {
                session_id,
                category: default_category,
                occurred_at: Utc::now(),
            }),
        )?;
        record(&events);
        tracing::info!(session_id = %session_id, mode = %mode, "storefront opened");

        Ok(Self {
            session_id,
            snapshot,
            session,
            tray: CompareTray::new(session_id),
            cart: Cart::new(session_id),
            mode,
            search: String::new(),
        })
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn session(&self) -> &BrowseSession {
        &self.session
    }

    pub fn tray(&self) -> &CompareTray {
        &self.tray
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Swap the externally-owned snapshot, then pull the held page back under
    /// the recomputed page count (the collection may have shrunk).
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) -> DomainResult<usize> {
        self.snapshot = snapshot;
        self.clamp_page()
    }

    /// Switch display mode. A larger page size shrinks the page count, so the
    /// held page is clamped afterwards.
    pub fn set_mode(&mut self, mode: DisplayMode) -> DomainResult<usize> {
        self.mode = mode;
        self.clamp_page()
    }

    /// Set the search string narrowing the product set, then clamp.
    pub fn set_search(&mut self, query: impl Into<String>) -> DomainResult<usize> {
        self.search = query.into();
        self.clamp_page()
    }

    pub fn clear_search(&mut self) -> DomainResult<usize> {
        self.set_search("")
    }

    /// Select a category tab. The page always resets to 0.
    pub fn select_category(&mut self, category: CategoryId) -> DomainResult<usize> {
        self.dispatch_session(BrowseSessionCommand::SelectCategory(SelectCategory {
            session_id: self.session_id,
            category,
            occurred_at: Utc::now(),
        }))
    }

    /// Jump to a page (a pagination dot). The raw index is stored; an
    /// out-of-range index renders as an empty page until something clamps it.
    pub fn select_page(&mut self, page: usize) -> DomainResult<usize> {
        self.dispatch_session(BrowseSessionCommand::SelectPage(SelectPage {
            session_id: self.session_id,
            page,
            occurred_at: Utc::now(),
        }))
    }

    /// Advance one page (right swipe). Saturates at the last page.
    pub fn next_page(&mut self) -> DomainResult<usize> {
        let page_count = self.filtered_page_count();
        self.dispatch_session(BrowseSessionCommand::NextPage(NextPage {
            session_id: self.session_id,
            page_count,
            occurred_at: Utc::now(),
        }))
    }

    /// Go back one page (left swipe). Saturates at the first page.
    pub fn previous_page(&mut self) -> DomainResult<usize> {
        self.dispatch_session(BrowseSessionCommand::PreviousPage(PreviousPage {
            session_id: self.session_id,
            occurred_at: Utc::now(),
        }))
    }

    /// Put a product in the cart; a repeated add merges quantities.
    pub fn add_to_cart(&mut self, product_id: &ProductId, quantity: u32) -> DomainResult<usize> {
        let product = self.lookup(product_id)?;
        let command = CartCommand::AddProduct(AddProduct {
            session_id: self.session_id,
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
            occurred_at: Utc::now(),
        });
        self.dispatch_cart(command)
    }

    /// Set a cart line's quantity to an absolute value.
    pub fn change_quantity(&mut self, product_id: &ProductId, quantity: u32) -> DomainResult<usize> {
        self.dispatch_cart(CartCommand::ChangeQuantity(ChangeQuantity {
            session_id: self.session_id,
            product_id: product_id.clone(),
            quantity,
            occurred_at: Utc::now(),
        }))
    }

    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> DomainResult<usize> {
        self.dispatch_cart(CartCommand::RemoveProduct(RemoveProduct {
            session_id: self.session_id,
            product_id: product_id.clone(),
            occurred_at: Utc::now(),
        }))
    }

    pub fn clear_cart(&mut self) -> DomainResult<usize> {
        self.dispatch_cart(CartCommand::ClearCart(ClearCart {
            session_id: self.session_id,
            occurred_at: Utc::now(),
        }))
    }

    /// Put a product on the comparison tray.
    pub fn add_to_compare(&mut self, product_id: &ProductId) -> DomainResult<usize> {
        let product = self.lookup(product_id)?;
        let command = CompareTrayCommand::AddToCompare(AddToCompare {
            session_id: self.session_id,
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            occurred_at: Utc::now(),
        });
        self.dispatch_tray(command)
    }

    /// Take one product off the tray.
    pub fn remove_from_compare(&mut self, product_id: &ProductId) -> DomainResult<usize> {
        self.dispatch_tray(CompareTrayCommand::RemoveFromCompare(RemoveFromCompare {
            session_id: self.session_id,
            product_id: product_id.clone(),
            occurred_at: Utc::now(),
        }))
    }

    /// Empty the whole tray.
    pub fn clear_compare(&mut self) -> DomainResult<usize> {
        self.dispatch_tray(CompareTrayCommand::ClearCompare(ClearCompare {
            session_id: self.session_id,
            occurred_at: Utc::now(),
        }))
    }

    /// Recompute the view model for the current state.
    ///
    /// Search narrowing runs first, category tabs are derived from the
    /// narrowed set, the selected category narrows further, and pagination
    /// slices last. Pure read: calling this twice yields identical values.
    pub fn page(&self) -> CatalogPage {
        let searched = search_by_name(&self.snapshot.products, &self.search);
        let search_results = (!self.search.trim().is_empty()).then_some(searched.len());

        let tabs: Vec<CategoryTab> =
            represented_categories(searched.iter().copied(), &self.snapshot.categories)
                .into_iter()
                .map(|category| CategoryTab {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    active: Some(&category.id) == self.session.category(),
                })
                .collect();

        let in_category: Vec<&Product> = match self.session.category() {
            Some(category) => products_in_category(searched, category),
            None => searched,
        };
        let view = paginate(&in_category, self.mode, self.session.page());

        CatalogPage {
            mode: self.mode,
            tabs,
            active_category: self.session.category().cloned(),
            page: self.session.page(),
            page_count: view.page_count,
            visible: view.visible.iter().map(|product| (*product).clone()).collect(),
            search_results,
            compare: self.tray.items().to_vec(),
            cart: CartSummary::of(&self.cart),
        }
    }

    /// The search-narrowed, category-filtered product selection.
    fn narrowed(&self) -> Vec<&Product> {
        let searched = search_by_name(&self.snapshot.products, &self.search);
        match self.session.category() {
            Some(category) => products_in_category(searched, category),
            None => searched,
        }
    }

    fn filtered_page_count(&self) -> usize {
        page_count(self.narrowed().len(), self.mode)
    }

    fn clamp_page(&mut self) -> DomainResult<usize> {
        let page_count = self.filtered_page_count();
        self.dispatch_session(BrowseSessionCommand::ClampPage(ClampPage {
            session_id: self.session_id,
            page_count,
            occurred_at: Utc::now(),
        }))
    }

    fn lookup(&self, product_id: &ProductId) -> DomainResult<&Product> {
        self.snapshot
            .product(product_id)
            .ok_or_else(DomainError::not_found)
    }

    fn dispatch_session(&mut self, command: BrowseSessionCommand) -> DomainResult<usize> {
        let events = execute(&mut self.session, &command)?;
        Ok(record(&events))
    }

    fn dispatch_tray(&mut self, command: CompareTrayCommand) -> DomainResult<usize> {
        let events = execute(&mut self.tray, &command)?;
        Ok(record(&events))
    }

    fn dispatch_cart(&mut self, command: CartCommand) -> DomainResult<usize> {
        let events = execute(&mut self.cart, &command)?;
        Ok(record(&events))
    }
}

/// Log committed events and report how many there were.
fn record<E: Event>(events: &[E]) -> usize {
    for event in events {
        tracing::debug!(event_type = event.event_type(), "event committed");
    }
    events.len()
}
