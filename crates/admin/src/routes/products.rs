//! Products page: listing, selection and the create/edit/delete modals.
//!
//! The page is server rendered. Filter, sort, page, selection and the open
//! modal all live in the query string, so every interaction is a plain link
//! or form. Mutations are posted to `POST /products`, which redirects back to
//! the listing with the outcome as a toast.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Query, State},
    response::Redirect,
};
use product_desk_core::listing::format::{
    NOT_AVAILABLE, format_date, format_price, status_tone, tags_label,
};
use product_desk_core::listing::{
    self, ActionForm, ActionKind, ActionOutcome, ListingAction, ListingPage, ListingState,
    LogicError, Modal, PageAction, ProductForm, ProductsPage, Selection, SortKey, StatusFilter,
    StatusTab, Submission, Toast,
};
use product_desk_core::{ProductId, ProductStatus};
use serde::Deserialize;
use tracing::instrument;
use url::form_urlencoded;

use crate::{
    components::{DataTableConfig, products_table_config},
    filters,
    shopify::{AdminClient, DEFAULT_PAGE_SIZE, Product},
    state::AppState,
};

const PRODUCTS_PATH: &str = "/products";

/// Query parameters of the products page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Title search text.
    #[serde(default)]
    pub q: String,
    /// Comma-separated statuses, e.g. `ACTIVE,DRAFT`.
    #[serde(default)]
    pub status: String,
    /// Status tab; replaces `status` when present.
    #[serde(default)]
    pub tab: String,
    /// Sort key, e.g. `title asc`.
    #[serde(default)]
    pub sort: String,
    /// 1-based page index.
    #[serde(default)]
    pub page: String,
    /// Comma-separated selected product ids.
    #[serde(default)]
    pub selected: String,
    /// Modal to open: `create`, `edit` or `delete`.
    #[serde(default)]
    pub modal: String,
    /// Toast message carried through a redirect.
    #[serde(default)]
    pub toast: String,
    /// Toast tone: `success` or `critical`.
    #[serde(default)]
    pub tone: String,
}

/// Posted product action plus the listing to return to.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductActionForm {
    #[serde(flatten)]
    pub action: ActionForm,
    #[serde(default)]
    pub return_q: String,
    #[serde(default)]
    pub return_status: String,
    #[serde(default)]
    pub return_sort: String,
    #[serde(default)]
    pub return_page: String,
}

// =============================================================================
// View Types
// =============================================================================

/// Product row for templates.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: String,
    pub legacy_id: String,
    pub title: String,
    pub image_url: Option<String>,
    pub image_alt: String,
    pub status_label: &'static str,
    pub status_tone: &'static str,
    pub tags: String,
    pub product_type: String,
    pub vendor: String,
    pub price: String,
    pub updated: String,
    pub selected: bool,
    pub toggle_href: String,
}

impl ProductRow {
    fn new(product: &Product, selection: &Selection, listing: &ListingState) -> Self {
        let mut toggled = selection.clone();
        toggled.toggle(&product.id);

        let price_range = product.price_range.as_ref();
        Self {
            id: product.id.to_string(),
            legacy_id: product.id.legacy_id().to_owned(),
            title: product.title.clone(),
            image_url: product.featured_image.as_ref().map(|img| img.url.clone()),
            image_alt: product
                .featured_image
                .as_ref()
                .and_then(|img| img.alt_text.clone())
                .unwrap_or_else(|| product.title.clone()),
            status_label: product.status.label(),
            status_tone: status_tone(product.status),
            tags: tags_label(&product.tags),
            product_type: or_not_available(&product.product_type),
            vendor: or_not_available(&product.vendor),
            price: format_price(
                price_range.map(|range| &range.min),
                price_range.map(|range| &range.max),
            ),
            updated: format_date(product.updated_at),
            selected: selection.contains(&product.id),
            toggle_href: products_href(listing, &toggled, None, None),
        }
    }
}

/// A link that may be the active one in its group.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Table header cell; sortable headers carry a link.
#[derive(Debug, Clone)]
pub struct HeaderCell {
    pub label: &'static str,
    pub href: Option<String>,
    pub indicator: &'static str,
}

/// Entry of a `<select>`.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Button above the table that opens a modal.
#[derive(Debug, Clone)]
pub struct ActionButton {
    pub label: &'static str,
    pub icon: &'static str,
    pub href: String,
    pub destructive: bool,
}

/// The open modal.
#[derive(Debug, Clone)]
pub struct ModalView {
    pub title: &'static str,
    pub action_type: &'static str,
    pub product_id: String,
    pub product_title: String,
    pub submit_label: &'static str,
    /// Create and edit show the form; delete shows a confirmation.
    pub has_form: bool,
    pub destructive: bool,
}

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub current_path: &'static str,
    pub table: DataTableConfig,
    pub query: String,
    pub status_value: String,
    pub sort_value: &'static str,
    pub sort_options: Vec<SelectOption>,
    pub tabs: Vec<NavLink>,
    pub status_filters: Vec<NavLink>,
    pub status_filter_label: Option<String>,
    pub remove_status_href: String,
    pub clear_all_href: String,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<ProductRow>,
    pub all_selected: bool,
    pub toggle_all_href: String,
    pub total_count: usize,
    pub filtered_count: usize,
    pub first_row: usize,
    pub last_row: usize,
    pub page: usize,
    pub page_count: usize,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub selected_count: usize,
    pub clear_selection_href: String,
    pub create_href: String,
    pub actions: Vec<ActionButton>,
    pub modal: Option<ModalView>,
    pub form: ProductForm,
    pub status_choices: Vec<SelectOption>,
    pub close_href: String,
    pub toast: Option<Toast>,
    pub toast_duration_ms: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Products list page handler.
///
/// Loads the catalog once and derives the visible page from the query
/// string. A failed fetch renders an empty table with an error toast.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> ProductsIndexTemplate {
    let (products, load_error) = match state
        .shopify()
        .list_products(DEFAULT_PAGE_SIZE, None)
        .await
    {
        Ok(connection) => (connection.products, None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch products");
            (
                Vec::new(),
                Some(Toast::error(format!("Could not reach Shopify: {e}"))),
            )
        }
    };

    let mut page = ProductsPage {
        listing: listing_state(
            &query.q,
            &query.status,
            &query.tab,
            &query.sort,
            &query.page,
        ),
        selection: Selection::parse(&query.selected),
        toast: Toast::from_query(&query.toast, Some(query.tone.as_str())),
        ..ProductsPage::default()
    };

    let visible = listing::derive_page(&products, &page.listing);
    page.listing.page = visible.page;
    page.selection.retain_visible(&visible);

    if let Err(err) = open_modal(state.shopify(), &mut page, &products, &query.modal).await {
        tracing::debug!(error = %err, modal = %query.modal, "Modal refused");
        page.toast = Some(Toast::from(&err));
    }
    if load_error.is_some() {
        page.toast = load_error;
    }

    render(&page, &visible, products.len())
}

/// Product action handler (create, update, delete).
///
/// Always redirects (303) back to the listing the form was posted from,
/// with the outcome as a toast.
#[instrument(skip(state, form), fields(action = %form.action.action_type))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ProductActionForm>,
) -> Redirect {
    let listing = listing_state(
        &form.return_q,
        &form.return_status,
        "",
        &form.return_sort,
        &form.return_page,
    );

    let outcome = match Submission::try_from(form.action) {
        Ok(submission) => match state.in_flight().begin(&submission) {
            Some(_guard) => send(state.shopify(), &submission).await,
            None => {
                tracing::warn!(key = %submission.key(), "Duplicate submission refused");
                ActionOutcome::Refused(LogicError::AlreadyPending)
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, "Product action refused");
            ActionOutcome::Refused(err)
        }
    };

    let toast = outcome.toast();
    Redirect::to(&products_href(
        &listing,
        &Selection::default(),
        None,
        Some(&toast),
    ))
}

/// Send one mutation and classify the result.
async fn send(client: &AdminClient, submission: &Submission) -> ActionOutcome {
    let action = submission.kind();
    let result = match submission {
        Submission::Create(input) => client.create_product(input).await.map(|p| p.id),
        Submission::Update { id, input } => client.update_product(id, input).await.map(|p| p.id),
        Submission::Delete(id) => client.delete_product(id).await,
    };

    match result {
        Ok(id) => {
            tracing::info!(action = %action, product_id = %id, "Product action succeeded");
            ActionOutcome::Succeeded(action)
        }
        Err(e) => {
            tracing::error!(action = %action, error = %e, "Product action failed");
            e.into_outcome(action)
        }
    }
}

/// Open the modal named in the query string.
async fn open_modal(
    client: &AdminClient,
    page: &mut ProductsPage,
    products: &[Product],
    modal: &str,
) -> Result<(), LogicError> {
    match modal.trim() {
        "create" => {
            page.apply(PageAction::OpenCreate)?;
        }
        "edit" => {
            page.apply(PageAction::OpenEdit)?;
            if let Modal::Edit(id) = page.modal.clone() {
                let form = edit_form(client, &id, products).await;
                page.apply(PageAction::FillForm(form))?;
            }
        }
        "delete" => {
            page.apply(PageAction::OpenDelete)?;
        }
        _ => {}
    }
    Ok(())
}

/// Prefill the edit form, preferring the HTML description from the API and
/// falling back to the listing row.
async fn edit_form(client: &AdminClient, id: &ProductId, products: &[Product]) -> ProductForm {
    match client.get_product(id).await {
        Ok(Some(detail)) => {
            return ProductForm::from_fields(
                &detail.title,
                &detail.description_html,
                &detail.product_type,
                &detail.vendor,
                detail.status,
                &detail.tags,
            );
        }
        Ok(None) => tracing::warn!(product_id = %id, "Product not found for edit form"),
        Err(e) => tracing::warn!(product_id = %id, error = %e, "Failed to load product for edit form"),
    }

    products
        .iter()
        .find(|product| &product.id == id)
        .map(|product| {
            ProductForm::from_fields(
                &product.title,
                &product.description,
                &product.product_type,
                &product.vendor,
                product.status,
                &product.tags,
            )
        })
        .unwrap_or_default()
}

// =============================================================================
// Rendering
// =============================================================================

fn render(
    page: &ProductsPage,
    visible: &ListingPage<'_, Product>,
    total_count: usize,
) -> ProductsIndexTemplate {
    let table = products_table_config();
    let listing = &page.listing;
    let selection = &page.selection;
    let navigate = |action: ListingAction| listing_href(&listing.clone().apply(action));

    let active_tab = StatusTab::for_filter(&listing.statuses);
    let tabs = StatusTab::ALL
        .into_iter()
        .map(|tab| NavLink {
            label: tab.label(),
            href: navigate(ListingAction::SelectTab(tab)),
            active: active_tab == Some(tab),
        })
        .collect();

    let status_filters = table
        .filters
        .iter()
        .filter(|filter| filter.key == "status")
        .flat_map(|filter| &filter.options)
        .filter_map(|option| option.value.parse::<ProductStatus>().ok())
        .map(|status| {
            let active = listing.statuses.contains(status);
            let toggled = StatusFilter::new(
                listing
                    .statuses
                    .iter()
                    .filter(|s| *s != status)
                    .chain((!active).then_some(status)),
            );
            NavLink {
                label: status.label(),
                href: navigate(ListingAction::SetStatuses(toggled)),
                active,
            }
        })
        .collect();

    let headers = table
        .columns
        .iter()
        .map(|column| HeaderCell {
            label: column.label,
            href: column
                .next_sort(listing.sort)
                .map(|sort| navigate(ListingAction::SetSort(sort))),
            indicator: match column.sorts {
                Some((asc, _)) if asc == listing.sort => "\u{25b2}",
                Some((_, desc)) if desc == listing.sort => "\u{25bc}",
                _ => "",
            },
        })
        .collect();

    let sort_options = SortKey::ALL
        .into_iter()
        .map(|sort| SelectOption {
            value: sort.as_str(),
            label: sort.label(),
            selected: sort == listing.sort,
        })
        .collect();

    let rows: Vec<ProductRow> = visible
        .rows
        .iter()
        .map(|product| ProductRow::new(product, selection, listing))
        .collect();

    let mut all_toggled = selection.clone();
    all_toggled.toggle_all(visible);

    let actions = table
        .row_actions
        .iter()
        .map(|action| ActionButton {
            label: action.label,
            icon: action.icon,
            href: products_href(listing, selection, Some(action.kind.verb()), None),
            destructive: action.destructive,
        })
        .collect();

    let modal = modal_view(&page.modal, visible);
    let status_choices = ProductStatus::ALL
        .into_iter()
        .map(|status| SelectOption {
            value: status.as_str(),
            label: status.label(),
            selected: status == page.form.status,
        })
        .collect();

    ProductsIndexTemplate {
        current_path: PRODUCTS_PATH,
        query: listing.query.clone(),
        status_value: listing.statuses.to_query_value(),
        sort_value: listing.sort.as_str(),
        sort_options,
        tabs,
        status_filters,
        status_filter_label: (!listing.statuses.is_empty()).then(|| listing.statuses.label()),
        remove_status_href: navigate(ListingAction::RemoveStatusFilter),
        clear_all_href: navigate(ListingAction::ClearAll),
        headers,
        all_selected: !rows.is_empty() && rows.iter().all(|row| row.selected),
        rows,
        toggle_all_href: products_href(listing, &all_toggled, None, None),
        total_count,
        filtered_count: visible.filtered_count,
        first_row: visible.first_row(),
        last_row: visible.last_row(),
        page: visible.page,
        page_count: visible.page_count,
        previous_href: visible
            .has_previous()
            .then(|| navigate(ListingAction::PreviousPage)),
        next_href: visible.has_next().then(|| navigate(ListingAction::NextPage)),
        selected_count: selection.len(),
        clear_selection_href: listing_href(listing),
        create_href: products_href(
            listing,
            selection,
            Some(ActionKind::Create.verb()),
            None,
        ),
        actions,
        modal,
        form: page.form.clone(),
        status_choices,
        close_href: products_href(listing, selection, None, None),
        toast: page.toast.clone(),
        toast_duration_ms: Toast::DURATION_SECS * 1000,
        table,
    }
}

fn modal_view(modal: &Modal, visible: &ListingPage<'_, Product>) -> Option<ModalView> {
    let title_of = |id: &ProductId| {
        visible
            .rows
            .iter()
            .find(|product| &product.id == id)
            .map(|product| product.title.clone())
            .unwrap_or_default()
    };

    match modal {
        Modal::None => None,
        Modal::Create => Some(ModalView {
            title: "Create product",
            action_type: ActionKind::Create.as_str(),
            product_id: String::new(),
            product_title: String::new(),
            submit_label: "Create",
            has_form: true,
            destructive: false,
        }),
        Modal::Edit(id) => Some(ModalView {
            title: "Edit product",
            action_type: ActionKind::Update.as_str(),
            product_id: id.to_string(),
            product_title: title_of(id),
            submit_label: "Save",
            has_form: true,
            destructive: false,
        }),
        Modal::Delete(id) => Some(ModalView {
            title: "Delete product",
            action_type: ActionKind::Delete.as_str(),
            product_id: id.to_string(),
            product_title: title_of(id),
            submit_label: "Delete",
            has_form: false,
            destructive: true,
        }),
    }
}

// =============================================================================
// Query Strings
// =============================================================================

/// Rebuild a listing state from query-string values.
fn listing_state(query: &str, status: &str, tab: &str, sort: &str, page: &str) -> ListingState {
    let statuses = StatusTab::parse(tab).map_or_else(
        || ListingAction::SetStatuses(StatusFilter::parse(status)),
        ListingAction::SelectTab,
    );

    ListingState::default()
        .apply(ListingAction::SetQuery(query.to_owned()))
        .apply(statuses)
        .apply(ListingAction::SetSort(SortKey::parse(sort)))
        .apply(ListingAction::GoToPage(page.trim().parse().unwrap_or(1)))
}

fn listing_href(listing: &ListingState) -> String {
    products_href(listing, &Selection::default(), None, None)
}

/// URL of the products page for the given state. Default values are omitted.
fn products_href(
    listing: &ListingState,
    selection: &Selection,
    modal: Option<&str>,
    toast: Option<&Toast>,
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !listing.query.is_empty() {
        query.append_pair("q", &listing.query);
    }
    if !listing.statuses.is_empty() {
        query.append_pair("status", &listing.statuses.to_query_value());
    }
    if listing.sort != SortKey::default() {
        query.append_pair("sort", listing.sort.as_str());
    }
    if listing.page > 1 {
        query.append_pair("page", &listing.page.to_string());
    }
    if !selection.is_empty() {
        query.append_pair("selected", &selection.to_query_value());
    }
    if let Some(modal) = modal {
        query.append_pair("modal", modal);
    }
    if let Some(toast) = toast {
        query.append_pair("toast", &toast.message);
        query.append_pair("tone", toast.tone());
    }

    let query = query.finish();
    if query.is_empty() {
        PRODUCTS_PATH.to_owned()
    } else {
        format!("{PRODUCTS_PATH}?{query}")
    }
}

fn or_not_available(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_owned()
    } else {
        value.to_owned()
    }
}
