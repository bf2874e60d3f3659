//! Related-list data controller

use tokio_util::sync::CancellationToken;

use crate::columns::build_columns;
use crate::config::ConfigCache;
use crate::config::RelatedListConfig;
use crate::error::FetchError;
use crate::memo::Memo;
use crate::model::CardField;
use crate::model::Column;
use crate::model::Record;
use crate::model::Value;
use crate::paging::PaginationManager;
use crate::paging::RevealOutcome;
use crate::scroll::ScrollDebouncer;
use crate::signature::DataInputs;
use crate::signature::DisplayInputs;
use crate::signature::Signature;
use crate::signature::SignatureTracker;
use crate::sort::Direction;
use crate::sort::sort_records;
use crate::source::ColumnDescriptor;
use crate::source::DataSource;
use crate::source::FetchParams;
use crate::source::FetchResult;
use crate::source::ListMode;

/// Identity of the parent record the list is related to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParentContext {
    /// Id of the parent record.
    pub record_id: String,
    /// Relationship descriptor supplied by the host, used when the
    /// configuration does not name a relationship field.
    pub relationship: String,
}

/// What the controller needs to do on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Inputs are unchanged since the last applied state.
    None,
    /// Only display-relevant inputs moved; columns rebuild locally without a
    /// remote fetch.
    RebuildColumns,
    /// Data-relevant inputs moved; a remote reload is required. Takes
    /// precedence over a simultaneous display-only change.
    Reload,
}

/// What a "view all" request asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAllDirective {
    /// Every record is now visible locally; nothing further to do.
    RevealedLocally,
    /// The server holds more records and the configuration prefers handing
    /// off to an external "view all" destination.
    NavigateExternally,
    /// The server holds more records and the configuration prefers an
    /// uncapped refetch.
    RefetchUncapped,
}

/// A fetch issued under a specific data signature.
///
/// The ticket travels with the in-flight fetch; applying it checks that the
/// signature in effect at issue time still matches the current one, so a
/// slower fetch superseded by a newer configuration is discarded silently.
#[derive(Debug)]
pub struct ReloadTicket {
    signature: Signature,
    /// The fetch parameters derived at issue time.
    pub params: FetchParams,
}

/// The stateful core behind one related-list widget.
///
/// The controller owns the configuration snapshot, the fetched record set and
/// every piece of derived view state. All operations run on the host's event
/// loop; remote calls through the [`DataSource`] are the only suspension
/// points.
///
/// Typical host wiring: call [`configure`](Self::configure) and
/// [`set_parent_context`](Self::set_parent_context) whenever the host
/// observes new values, then [`process_changes`](Self::process_changes) once
/// per tick; route user actions to the `request_*` methods; render from the
/// observable accessors.
pub struct RelatedListController<S> {
    source: S,
    raw_config: String,
    config_cache: ConfigCache,
    parent: Option<ParentContext>,
    data_tracker: SignatureTracker<DataInputs>,
    display_tracker: SignatureTracker<DisplayInputs>,
    applied_data: Option<Signature>,
    applied_display: Option<Signature>,
    fetched_columns: Vec<ColumnDescriptor>,
    records: Vec<Record>,
    columns: Vec<Column>,
    paging: PaginationManager,
    scroll: ScrollDebouncer,
    label: Memo<(String, usize, bool), String>,
    sort_state: Option<(String, Direction)>,
    loading: bool,
    refreshing: bool,
    error: Option<String>,
    notice: Option<String>,
    delete_allowed: bool,
}

impl<S: DataSource> RelatedListController<S> {
    /// Creates a controller over the given data source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            raw_config: String::new(),
            config_cache: ConfigCache::new(),
            parent: None,
            data_tracker: SignatureTracker::new(),
            display_tracker: SignatureTracker::new(),
            applied_data: None,
            applied_display: None,
            fetched_columns: Vec::new(),
            records: Vec::new(),
            columns: Vec::new(),
            paging: PaginationManager::default(),
            scroll: ScrollDebouncer::default(),
            label: Memo::new(),
            sort_state: None,
            loading: false,
            refreshing: false,
            error: None,
            notice: None,
            delete_allowed: false,
        }
    }

    // =========================================================================
    // Host inputs
    // =========================================================================

    /// Returns the underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Supplies or replaces the raw configuration blob.
    ///
    /// Takes effect on the next [`process_changes`](Self::process_changes);
    /// nothing is parsed or fetched here.
    pub fn configure(&mut self, raw: &str) {
        self.raw_config = raw.to_string();
    }

    /// Supplies the identity of the parent record.
    pub fn set_parent_context(
        &mut self,
        parent_id: impl Into<String>,
        relationship: impl Into<String>,
    ) {
        self.parent = Some(ParentContext {
            record_id: parent_id.into(),
            relationship: relationship.into(),
        });
    }

    // =========================================================================
    // Change detection and reload
    // =========================================================================

    /// Evaluates the current inputs against the last applied signatures.
    ///
    /// The data signature is checked first: a data-relevant change always
    /// wins over a simultaneous display-only change, and a display-only
    /// change never triggers a remote fetch.
    pub fn pending_action(&mut self) -> PendingAction {
        let (_, data, display) = self.derive_inputs();
        let data_sig = self.data_tracker.current(data);
        if self.applied_data.as_ref() != Some(data_sig) {
            return PendingAction::Reload;
        }
        let display_sig = self.display_tracker.current(display);
        if self.applied_display.as_ref() != Some(display_sig) {
            return PendingAction::RebuildColumns;
        }
        PendingAction::None
    }

    /// Issues a reload ticket under the current data signature.
    ///
    /// Returns `None` when nothing is fetchable yet (no parent context, or a
    /// standard list without an object type).
    pub fn begin_reload(&mut self) -> Option<ReloadTicket> {
        let (_, data, _) = self.derive_inputs();
        if data.parent_id.is_empty() {
            return None;
        }
        if data.mode == ListMode::Standard && data.object.is_empty() {
            return None;
        }
        let signature = self.data_tracker.current(data.clone()).clone();
        self.loading = true;
        self.scroll.load_started();
        Some(ReloadTicket {
            signature,
            params: FetchParams {
                mode: data.mode,
                parent_id: data.parent_id,
                object: data.object,
                relationship: data.relationship,
                fields: data.fields,
                filters: data.filters,
                max_records: data.max_records,
            },
        })
    }

    /// Applies the result of a fetch issued via
    /// [`begin_reload`](Self::begin_reload).
    ///
    /// Returns `false` when the ticket's signature no longer matches the
    /// current data signature; the stale result is discarded without touching
    /// any state. On success the record set is replaced wholesale, columns
    /// rebuild and pagination resets to the first page. On a fetch error the
    /// record set is cleared so stale rows never render next to the error.
    pub fn apply_reload(
        &mut self,
        ticket: ReloadTicket,
        result: Result<FetchResult, FetchError>,
    ) -> bool {
        let (config, data, display) = self.derive_inputs();
        let current = self.data_tracker.current(data).clone();
        if current != ticket.signature {
            log::debug!("Discarding stale fetch result for superseded inputs");
            return false;
        }
        self.loading = false;
        self.scroll.load_ended();
        let display_sig = self.display_tracker.current(display).clone();
        match result {
            Ok(fetch) => {
                let mode = config.list_mode();
                self.fetched_columns = fetch.columns;
                self.columns = build_columns(mode, &self.fetched_columns, &config);
                self.records = ingest_records(fetch.records, &self.columns, &config);
                self.sort_state = None;
                self.paging.set_page_size(config.initial_page_size());
                self.paging.reset(self.records.len(), fetch.server_has_more);
                self.paging.advance();
                self.error = None;
            }
            Err(err) => {
                log::warn!("Related list fetch failed: {err}");
                self.records.clear();
                self.fetched_columns.clear();
                self.columns.clear();
                self.paging.reset(0, false);
                self.error = Some(err.message().to_string());
            }
        }
        // The signature is applied either way; a failed fetch is retried by
        // an explicit refresh, not by every subsequent tick.
        self.applied_data = Some(ticket.signature);
        self.applied_display = Some(display_sig);
        true
    }

    /// Runs one controller tick: evaluates signatures and performs whatever
    /// action they require.
    ///
    /// Suppressed entirely while a manual refresh is in progress, so the
    /// refresh and the observation cycle never issue duplicate fetches for
    /// the same logical request.
    pub async fn process_changes(&mut self) {
        if self.refreshing {
            return;
        }
        match self.pending_action() {
            PendingAction::None => {}
            PendingAction::RebuildColumns => self.rebuild_columns(),
            PendingAction::Reload => match self.begin_reload() {
                Some(ticket) => {
                    let result = self.source.fetch(&ticket.params).await;
                    let object = ticket.params.object.clone();
                    if self.apply_reload(ticket, result) {
                        self.refresh_delete_permission(&object).await;
                    }
                }
                None => self.clear_unfetchable(),
            },
        }
    }

    /// Rebuilds columns and per-record projections from the cached fetch,
    /// without touching the remote source.
    fn rebuild_columns(&mut self) {
        let (config, _, display) = self.derive_inputs();
        self.columns = build_columns(config.list_mode(), &self.fetched_columns, &config);
        let records = std::mem::take(&mut self.records);
        self.records = ingest_records(records, &self.columns, &config);
        self.paging.set_page_size(config.initial_page_size());
        self.applied_display = Some(self.display_tracker.current(display).clone());
    }

    /// Clears view state when the current inputs describe nothing fetchable,
    /// and records the signatures as applied so the tick does not loop.
    fn clear_unfetchable(&mut self) {
        self.records.clear();
        self.fetched_columns.clear();
        self.columns.clear();
        self.paging.reset(0, false);
        self.error = None;
        let (_, data, display) = self.derive_inputs();
        self.applied_data = Some(self.data_tracker.current(data).clone());
        self.applied_display = Some(self.display_tracker.current(display).clone());
    }

    async fn refresh_delete_permission(&mut self, object: &str) {
        let allow = self.current_config().allow_delete;
        if !allow || object.is_empty() {
            self.delete_allowed = false;
            return;
        }
        self.delete_allowed = match self.source.can_delete(object).await {
            Ok(allowed) => allowed,
            Err(err) => {
                log::warn!("Delete permission check failed: {}", err.message());
                false
            }
        };
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// Extends the visible slice by one page of the already-fetched records.
    pub fn request_load_more(&mut self) {
        self.paging.advance();
    }

    /// Reveals all fetched records, or asks the host to go further.
    ///
    /// When the server reported records beyond the fetch cap, the directive
    /// follows the configured "view all" behavior: external navigation or an
    /// uncapped refetch.
    pub fn request_view_all(&mut self) -> ViewAllDirective {
        match self.paging.reveal_all() {
            RevealOutcome::Revealed => ViewAllDirective::RevealedLocally,
            RevealOutcome::ServerHasMore => {
                if self.current_config().view_all_navigates {
                    ViewAllDirective::NavigateExternally
                } else {
                    ViewAllDirective::RefetchUncapped
                }
            }
        }
    }

    /// Re-orders the already-fetched record set. No remote call.
    pub fn request_sort(&mut self, field_path: &str, direction: Direction) {
        let records = std::mem::take(&mut self.records);
        self.records = sort_records(records, field_path, direction);
        self.sort_state = Some((field_path.to_string(), direction));
    }

    /// Returns the sort currently applied, if any.
    pub fn sort_state(&self) -> Option<(&str, Direction)> {
        self.sort_state
            .as_ref()
            .map(|(field, direction)| (field.as_str(), *direction))
    }

    /// Forces a reload under the current inputs, even when unchanged.
    ///
    /// Mutually exclusive with the observation cycle: ticks that arrive while
    /// the refresh is in progress are suppressed.
    pub async fn request_refresh(&mut self) {
        if self.refreshing {
            return;
        }
        self.refreshing = true;
        if let Some(ticket) = self.begin_reload() {
            let result = self.source.fetch(&ticket.params).await;
            let object = ticket.params.object.clone();
            if self.apply_reload(ticket, result) {
                self.refresh_delete_permission(&object).await;
            }
        }
        self.refreshing = false;
    }

    /// Deletes one record by id, then refetches on confirmed success.
    ///
    /// There is no optimistic removal: on any failure the record set is left
    /// unchanged and a transient notice carries the message.
    pub async fn request_delete(&mut self, record_id: &str) {
        let config = self.current_config();
        if !config.allow_delete || !self.delete_allowed {
            self.notice = Some("You do not have permission to delete this record.".to_string());
            return;
        }
        let object = config.object_api_name.unwrap_or_default();
        match self.source.delete(&object, record_id).await {
            Ok(()) => {
                self.notice = None;
                self.request_refresh().await;
            }
            Err(err) => {
                log::warn!("Delete of record '{record_id}' failed: {err}");
                self.notice = Some(err.message());
            }
        }
    }

    /// Clears the transient notice after the host has shown it.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    // =========================================================================
    // Infinite scroll
    // =========================================================================

    /// Registers an infinite-scroll trigger.
    ///
    /// Returns the cancellation token of the armed delayed action, or `None`
    /// when infinite scroll is off, nothing more can load, or a load is
    /// already in flight.
    pub fn notify_scroll(&mut self) -> Option<CancellationToken> {
        if !self.current_config().infinite_scroll || !self.paging.has_more() {
            return None;
        }
        self.scroll.arm()
    }

    /// Waits out the debounce delay for an armed trigger and, if it survives,
    /// performs the load-more. Returns whether a load happened.
    pub async fn settle_scroll(&mut self, token: CancellationToken) -> bool {
        if !self.scroll.settle(token).await {
            return false;
        }
        self.request_load_more();
        true
    }

    // =========================================================================
    // Observable outputs
    // =========================================================================

    /// The visible prefix of the fetched record set.
    pub fn visible_records(&self) -> &[Record] {
        self.paging.visible_slice(&self.records)
    }

    /// The current display columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The user-visible error message from the last failed fetch, if any.
    pub fn error_state(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The transient notice from the last failed delete, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether more records are available, locally or on the server.
    pub fn has_more(&self) -> bool {
        self.paging.has_more()
    }

    /// Whether the current user may delete records of the listed type.
    pub fn delete_allowed(&self) -> bool {
        self.delete_allowed
    }

    /// The list header label, e.g. `Contacts (6)` or `Contacts (50+)` when
    /// the server holds more than the fetched cap.
    ///
    /// Recomputed only when the title or counts change.
    pub fn display_label(&mut self) -> &str {
        let config = self.current_config();
        let key = (
            config.display_title().to_string(),
            self.paging.total(),
            self.paging.server_has_more(),
        );
        self.label.get_or_compute(key, |(title, total, server_more)| {
            if *total == 0 {
                title.clone()
            } else if *server_more {
                format!("{title} ({total}+)")
            } else {
                format!("{title} ({total})")
            }
        })
    }

    /// The number of records currently fetched.
    pub fn total_records(&self) -> usize {
        self.paging.total()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn current_config(&mut self) -> RelatedListConfig {
        self.config_cache.get(&self.raw_config).clone()
    }

    fn derive_inputs(&mut self) -> (RelatedListConfig, DataInputs, DisplayInputs) {
        let config = self.config_cache.get(&self.raw_config).clone();
        let (parent_id, parent_relationship) = match &self.parent {
            Some(parent) => (parent.record_id.clone(), parent.relationship.clone()),
            None => (String::new(), String::new()),
        };
        let mut data = DataInputs::derive(&config, &parent_id);
        if data.relationship.is_empty() {
            data.relationship = parent_relationship;
        }
        let display = DisplayInputs::derive(&config);
        (config, data, display)
    }
}

/// Computes the derived per-record state exactly once at ingestion: flattened
/// synthetic keys for dotted columns, the navigation URL, and the card
/// projection.
fn ingest_records(
    records: Vec<Record>,
    columns: &[Column],
    config: &RelatedListConfig,
) -> Vec<Record> {
    let base = config.link_base_path().trim_end_matches('/').to_string();
    records
        .into_iter()
        .map(|mut record| {
            let mut flattened: Vec<(String, Value)> = Vec::new();
            for column in columns {
                if !column.source_path.contains('.') {
                    continue;
                }
                let value = match record.get_path(&column.source_path) {
                    Ok(Some(value)) => value.clone(),
                    Ok(None) => Value::Null,
                    Err(err) => {
                        log::warn!(
                            "Cannot flatten '{}' on record '{}': {err}",
                            column.source_path,
                            record.id()
                        );
                        Value::Null
                    }
                };
                flattened.push((column.field.clone(), value));
            }
            for (field, value) in flattened {
                record.insert(field, value);
            }
            if config.link_records {
                record.set_link_url(format!("{}/{}", base, record.id()));
            }
            let card = columns
                .iter()
                .map(|column| CardField {
                    label: column.label.clone(),
                    field: column.field.clone(),
                    value: record
                        .get(&column.field)
                        .map(Value::display_text)
                        .unwrap_or_default(),
                })
                .collect();
            record.set_card_view(card);
            record
        })
        .collect()
}
