//! Page-level state for the products screen: selection, modals, the product
//! form and the in-flight mutation.
//!
//! [`ProductsPage::apply`] is the only way to change this state. Actions that
//! would misuse the page (editing with no row selected, submitting twice)
//! return a [`LogicError`] and leave the state untouched.

use serde::Deserialize;

use super::{ListingAction, ListingState, Selection};
use crate::types::{GidError, ProductId, ProductInput, ProductStatus, TagList, UserError};

/// The three mutations the page can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// `productCreate`.
    Create,
    /// `productUpdate`.
    Update,
    /// `productDelete`.
    Delete,
}

impl ActionKind {
    /// Form value of the `actionType` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Verb used in user-facing messages.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "edit",
            Self::Delete => "delete",
        }
    }

    const fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }

    /// Parse the `actionType` form value.
    ///
    /// # Errors
    ///
    /// Returns [`LogicError::UnknownAction`] for anything but
    /// `create`, `update` or `delete`.
    pub fn parse(value: &str) -> Result<Self, LogicError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(LogicError::UnknownAction(value.to_owned())),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller misuse of the page. Never reaches the network.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    /// Edit/delete need exactly one selected row.
    #[error("Select exactly one product to {}", .action.verb())]
    SelectionRequired {
        /// The action that was attempted.
        action: ActionKind,
        /// How many rows were selected.
        selected: usize,
    },

    /// A mutation is still outstanding.
    #[error("A request is already in progress")]
    AlreadyPending,

    /// Submit with no modal open.
    #[error("Open a product form before submitting")]
    NoOpenForm,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("A product id is required to {}", .0.verb())]
    MissingProductId(ActionKind),

    #[error("Invalid product id: {0}")]
    InvalidProductId(GidError),

    #[error("Invalid product status: {0}")]
    InvalidStatus(String),
}

/// Which modal is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    None,
    Create,
    Edit(ProductId),
    Delete(ProductId),
}

impl Modal {
    /// Whether any modal is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// The create/edit form. `tags` holds the raw comma-separated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub title: String,
    pub description_html: String,
    pub product_type: String,
    pub vendor: String,
    pub status: ProductStatus,
    pub tags: String,
}

impl ProductForm {
    /// Prefill from an existing product.
    #[must_use]
    pub fn from_fields(
        title: &str,
        description_html: &str,
        product_type: &str,
        vendor: &str,
        status: ProductStatus,
        tags: &TagList,
    ) -> Self {
        Self {
            title: title.to_owned(),
            description_html: description_html.to_owned(),
            product_type: product_type.to_owned(),
            vendor: vendor.to_owned(),
            status,
            tags: tags.to_form_value(),
        }
    }

    /// Mutation input for this form. Tags are split on commas and trimmed.
    #[must_use]
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            title: self.title.clone(),
            description_html: self.description_html.clone(),
            product_type: self.product_type.clone(),
            vendor: self.vendor.clone(),
            status: self.status,
            tags: TagList::parse(&self.tags),
        }
    }
}

/// Raw form-encoded fields of a product action, as posted by the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionForm {
    pub action_type: String,
    pub product_id: String,
    pub title: String,
    pub description_html: String,
    pub product_type: String,
    pub vendor: String,
    pub status: String,
    pub tags: String,
}

/// A mutation ready to send to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(ProductInput),
    Update { id: ProductId, input: ProductInput },
    Delete(ProductId),
}

impl Submission {
    /// Which mutation this is.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Create(_) => ActionKind::Create,
            Self::Update { .. } => ActionKind::Update,
            Self::Delete(_) => ActionKind::Delete,
        }
    }

    /// Target product, for update and delete.
    #[must_use]
    pub const fn product_id(&self) -> Option<&ProductId> {
        match self {
            Self::Create(_) => None,
            Self::Update { id, .. } | Self::Delete(id) => Some(id),
        }
    }

    /// Key identifying duplicate submissions, e.g. `delete:gid://shopify/Product/1`.
    ///
    /// Creates are keyed by title.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Create(input) => format!("create:{}", input.title.trim()),
            Self::Update { id, .. } => format!("update:{id}"),
            Self::Delete(id) => format!("delete:{id}"),
        }
    }
}

impl TryFrom<ActionForm> for Submission {
    type Error = LogicError;

    fn try_from(form: ActionForm) -> Result<Self, Self::Error> {
        let kind = ActionKind::parse(&form.action_type)?;

        let id = || -> Result<ProductId, LogicError> {
            let raw = form.product_id.trim();
            if raw.is_empty() {
                return Err(LogicError::MissingProductId(kind));
            }
            ProductId::parse(raw).map_err(LogicError::InvalidProductId)
        };

        let input = || -> Result<ProductInput, LogicError> {
            let status = parse_status(&form.status)?;
            let product = ProductForm {
                title: form.title.clone(),
                description_html: form.description_html.clone(),
                product_type: form.product_type.clone(),
                vendor: form.vendor.clone(),
                status,
                tags: form.tags.clone(),
            };
            Ok(product.to_input())
        };

        Ok(match kind {
            ActionKind::Create => Self::Create(input()?),
            ActionKind::Update => Self::Update {
                id: id()?,
                input: input()?,
            },
            ActionKind::Delete => Self::Delete(id()?),
        })
    }
}

// Blank means the form default.
fn parse_status(value: &str) -> Result<ProductStatus, LogicError> {
    if value.trim().is_empty() {
        return Ok(ProductStatus::default());
    }
    value.parse().map_err(|_| LogicError::InvalidStatus(value.to_owned()))
}

/// The mutation currently outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub kind: ActionKind,
    pub key: String,
}

impl From<&Submission> for PendingAction {
    fn from(submission: &Submission) -> Self {
        Self {
            kind: submission.kind(),
            key: submission.key(),
        }
    }
}

/// How a submitted mutation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded(ActionKind),
    /// Network or API-level failure.
    TransportFailed { action: ActionKind, detail: String },
    /// Field-level `userErrors`.
    Rejected {
        action: ActionKind,
        errors: Vec<UserError>,
    },
    /// Refused before anything was sent.
    Refused(LogicError),
}

impl ActionOutcome {
    /// Notification for this outcome.
    #[must_use]
    pub fn toast(&self) -> Toast {
        match self {
            Self::Succeeded(action) => {
                Toast::success(format!("Product {} successfully", action.past_tense()))
            }
            Self::TransportFailed { detail, .. } => {
                Toast::error(format!("Could not reach Shopify: {detail}"))
            }
            Self::Rejected { errors, .. } if errors.is_empty() => {
                Toast::error("Shopify rejected the product")
            }
            Self::Rejected { errors, .. } => {
                let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
                Toast::error(format!(
                    "Shopify rejected the product: {}",
                    details.join("; ")
                ))
            }
            Self::Refused(err) => Toast::from(err),
        }
    }
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
}

impl Toast {
    /// How long the page shows a toast.
    pub const DURATION_SECS: u32 = 5;

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }

    /// Query-string tone: `success` or `critical`.
    #[must_use]
    pub const fn tone(&self) -> &'static str {
        if self.is_error { "critical" } else { "success" }
    }

    /// Rebuild a toast carried through a redirect.
    #[must_use]
    pub fn from_query(message: &str, tone: Option<&str>) -> Option<Self> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        Some(match tone {
            Some("critical") => Self::error(message),
            _ => Self::success(message),
        })
    }
}

impl From<&LogicError> for Toast {
    fn from(err: &LogicError) -> Self {
        Self::error(err.to_string())
    }
}

/// Inputs to [`ProductsPage::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Change filter, sort or page. Clears the selection.
    Listing(ListingAction),
    ToggleRow(ProductId),
    ClearSelection,
    OpenCreate,
    OpenEdit,
    OpenDelete,
    /// Replace the form contents (prefill or user edits).
    FillForm(ProductForm),
    CloseModal,
    Submit,
    Completed(ActionOutcome),
    DismissToast,
}

/// All state of the products screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductsPage {
    pub listing: ListingState,
    pub selection: Selection,
    pub modal: Modal,
    pub form: ProductForm,
    pub pending: Option<PendingAction>,
    pub toast: Option<Toast>,
}

impl ProductsPage {
    /// Apply one action.
    ///
    /// Returns the mutation to send when the action is [`PageAction::Submit`].
    ///
    /// # Errors
    ///
    /// Returns a [`LogicError`] for edit/delete without exactly one selected
    /// row, a submit with no open form, or a submit while another is pending.
    /// The state is unchanged on error.
    pub fn apply(&mut self, action: PageAction) -> Result<Option<Submission>, LogicError> {
        match action {
            PageAction::Listing(action) => {
                self.listing = std::mem::take(&mut self.listing).apply(action);
                self.selection.clear();
            }
            PageAction::ToggleRow(id) => self.selection.toggle(&id),
            PageAction::ClearSelection => self.selection.clear(),
            PageAction::OpenCreate => {
                self.form = ProductForm::default();
                self.modal = Modal::Create;
            }
            PageAction::OpenEdit => {
                let id = self.selection.single(ActionKind::Update)?.clone();
                self.form = ProductForm::default();
                self.modal = Modal::Edit(id);
            }
            PageAction::OpenDelete => {
                let id = self.selection.single(ActionKind::Delete)?.clone();
                self.modal = Modal::Delete(id);
            }
            PageAction::FillForm(form) => self.form = form,
            PageAction::CloseModal => self.modal = Modal::None,
            PageAction::Submit => {
                if self.pending.is_some() {
                    return Err(LogicError::AlreadyPending);
                }
                let submission = match &self.modal {
                    Modal::None => return Err(LogicError::NoOpenForm),
                    Modal::Create => Submission::Create(self.form.to_input()),
                    Modal::Edit(id) => Submission::Update {
                        id: id.clone(),
                        input: self.form.to_input(),
                    },
                    Modal::Delete(id) => Submission::Delete(id.clone()),
                };
                self.pending = Some(PendingAction::from(&submission));
                return Ok(Some(submission));
            }
            PageAction::Completed(outcome) => {
                self.pending = None;
                self.modal = Modal::None;
                self.selection.clear();
                self.toast = Some(outcome.toast());
            }
            PageAction::DismissToast => self.toast = None,
        }
        Ok(None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(n: u32) -> ProductId {
        ProductId::parse(&n.to_string()).unwrap()
    }

    fn page_with_selection(ids: &[u32]) -> ProductsPage {
        let mut page = ProductsPage::default();
        for n in ids {
            page.apply(PageAction::ToggleRow(id(*n))).unwrap();
        }
        page
    }

    #[test]
    fn test_open_create_resets_form() {
        let mut page = ProductsPage::default();
        page.apply(PageAction::FillForm(ProductForm {
            title: "Old".to_string(),
            status: ProductStatus::Archived,
            ..ProductForm::default()
        }))
        .unwrap();

        page.apply(PageAction::OpenCreate).unwrap();
        assert_eq!(page.modal, Modal::Create);
        assert_eq!(page.form, ProductForm::default());
        assert_eq!(page.form.status, ProductStatus::Active);
    }

    #[test]
    fn test_edit_and_delete_need_exactly_one_row() {
        for ids in [&[][..], &[1, 2][..]] {
            let mut page = page_with_selection(ids);
            let before = page.clone();

            let err = page.apply(PageAction::OpenEdit).unwrap_err();
            assert_eq!(err.to_string(), "Select exactly one product to edit");
            let err = page.apply(PageAction::OpenDelete).unwrap_err();
            assert_eq!(err.to_string(), "Select exactly one product to delete");
            assert_eq!(page, before);
        }

        let mut page = page_with_selection(&[3]);
        page.apply(PageAction::OpenEdit).unwrap();
        assert_eq!(page.modal, Modal::Edit(id(3)));
        page.apply(PageAction::OpenDelete).unwrap();
        assert_eq!(page.modal, Modal::Delete(id(3)));
    }

    #[test]
    fn test_submit_without_modal_sends_nothing() {
        let mut page = ProductsPage::default();
        assert_eq!(page.apply(PageAction::Submit), Err(LogicError::NoOpenForm));
        assert!(page.pending.is_none());
    }

    #[test]
    fn test_submit_create_maps_form() {
        let mut page = ProductsPage::default();
        page.apply(PageAction::OpenCreate).unwrap();
        page.apply(PageAction::FillForm(ProductForm {
            title: "Tee".to_string(),
            tags: "a, b ,".to_string(),
            ..ProductForm::default()
        }))
        .unwrap();

        let submission = page.apply(PageAction::Submit).unwrap().unwrap();
        let Submission::Create(input) = submission else {
            panic!("expected create");
        };
        assert_eq!(input.title, "Tee");
        assert_eq!(input.tags.as_slice(), ["a", "b"]);
        assert_eq!(
            page.pending.as_ref().map(|p| p.kind),
            Some(ActionKind::Create)
        );
    }

    #[test]
    fn test_empty_tags_become_empty_set() {
        let form = ProductForm {
            tags: String::new(),
            ..ProductForm::default()
        };
        assert!(form.to_input().tags.is_empty());
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let mut page = page_with_selection(&[5]);
        page.apply(PageAction::OpenDelete).unwrap();

        let first = page.apply(PageAction::Submit).unwrap();
        assert_eq!(first, Some(Submission::Delete(id(5))));
        let pending = page.pending.clone();

        assert_eq!(page.apply(PageAction::Submit), Err(LogicError::AlreadyPending));
        assert_eq!(page.pending, pending);
    }

    #[test]
    fn test_completed_resets_and_toasts() {
        let mut page = page_with_selection(&[5]);
        page.apply(PageAction::OpenEdit).unwrap();
        page.apply(PageAction::Submit).unwrap();

        page.apply(PageAction::Completed(ActionOutcome::Succeeded(ActionKind::Update)))
            .unwrap();
        assert!(page.pending.is_none());
        assert_eq!(page.modal, Modal::None);
        assert!(page.selection.is_empty());
        assert_eq!(
            page.toast,
            Some(Toast::success("Product updated successfully"))
        );

        page.apply(PageAction::DismissToast).unwrap();
        assert!(page.toast.is_none());
    }

    #[test]
    fn test_listing_change_clears_selection() {
        let mut page = page_with_selection(&[1]);
        page.apply(PageAction::Listing(ListingAction::SetQuery("x".to_string())))
            .unwrap();
        assert!(page.selection.is_empty());
        assert_eq!(page.listing.query, "x");
    }

    #[test]
    fn test_outcome_toasts_are_distinct() {
        let transport = ActionOutcome::TransportFailed {
            action: ActionKind::Delete,
            detail: "HTTP 503".to_string(),
        }
        .toast();
        assert_eq!(transport, Toast::error("Could not reach Shopify: HTTP 503"));

        let rejected = ActionOutcome::Rejected {
            action: ActionKind::Create,
            errors: vec![
                UserError {
                    field: Some(vec!["title".to_string()]),
                    message: "can't be blank".to_string(),
                },
                UserError {
                    field: None,
                    message: "Handle is taken".to_string(),
                },
            ],
        }
        .toast();
        assert_eq!(
            rejected.message,
            "Shopify rejected the product: title: can't be blank; Handle is taken"
        );
        assert!(rejected.is_error);

        let refused = ActionOutcome::Refused(LogicError::AlreadyPending).toast();
        assert_eq!(refused, Toast::error("A request is already in progress"));

        for (kind, message) in [
            (ActionKind::Create, "Product created successfully"),
            (ActionKind::Delete, "Product deleted successfully"),
        ] {
            assert_eq!(ActionOutcome::Succeeded(kind).toast().message, message);
        }
    }

    fn action_form(action_type: &str, product_id: &str) -> ActionForm {
        ActionForm {
            action_type: action_type.to_string(),
            product_id: product_id.to_string(),
            title: "Tee".to_string(),
            status: "DRAFT".to_string(),
            tags: "x, y".to_string(),
            ..ActionForm::default()
        }
    }

    #[test]
    fn test_submission_from_form() {
        let create = Submission::try_from(action_form("create", "")).unwrap();
        let Submission::Create(input) = &create else {
            panic!("expected create");
        };
        assert_eq!(input.status, ProductStatus::Draft);
        assert_eq!(input.tags.as_slice(), ["x", "y"]);
        assert_eq!(create.key(), "create:Tee");

        let update = Submission::try_from(action_form("update", "gid://shopify/Product/9")).unwrap();
        assert_eq!(update.product_id(), Some(&id(9)));
        assert_eq!(update.kind(), ActionKind::Update);

        let delete = Submission::try_from(action_form("delete", "9")).unwrap();
        assert_eq!(delete, Submission::Delete(id(9)));
        assert_eq!(delete.key(), "delete:gid://shopify/Product/9");
    }

    #[test]
    fn test_submission_from_form_rejects_misuse() {
        assert_eq!(
            Submission::try_from(action_form("publish", "")),
            Err(LogicError::UnknownAction("publish".to_string()))
        );
        assert_eq!(
            Submission::try_from(action_form("delete", " ")),
            Err(LogicError::MissingProductId(ActionKind::Delete))
        );
        assert!(matches!(
            Submission::try_from(action_form("update", "gid://shopify/Collection/1")),
            Err(LogicError::InvalidProductId(_))
        ));

        let mut form = action_form("create", "");
        form.status = "LIVE".to_string();
        assert_eq!(
            Submission::try_from(form),
            Err(LogicError::InvalidStatus("LIVE".to_string()))
        );
    }

    #[test]
    fn test_delete_ignores_form_fields() {
        let mut form = action_form("delete", "4");
        form.status = "garbage".to_string();
        assert_eq!(Submission::try_from(form), Ok(Submission::Delete(id(4))));
    }

    #[test]
    fn test_toast_from_query() {
        assert_eq!(Toast::from_query("", Some("critical")), None);
        assert_eq!(
            Toast::from_query("Saved", None),
            Some(Toast::success("Saved"))
        );
        let err = Toast::from_query("Nope", Some("critical")).unwrap();
        assert!(err.is_error);
        assert_eq!(err.tone(), "critical");
    }
}
