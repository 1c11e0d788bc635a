//! Screen controller: the only writer of referral screen state.
//!
//! The controller owns the backend handle, the session credential, the
//! invitation/entitlement snapshot and the invite sheet. Views read state
//! through [`ScreenController::state`] or subscribe to changes, and call the
//! async operations below in response to user input. Every operation returns
//! a [`ReferralResult`] and reports its outcome to the toast relay.
//!
//! ## Refresh ordering
//!
//! Each `getInfo` request is tagged with a sequence number when it is issued.
//! A response is applied only if no newer response has been applied already,
//! so two quick resend taps cannot leave the older list on screen.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::api::{Ack, ReferralApi};
use crate::entry::EntryParams;
use crate::error::{ActionKind, ReferralError, ReferralResult};
use crate::phone::PhoneField;
use crate::slots::{normalize, DisplaySlot};
use crate::toast::ToastRelay;
use crate::types::{InvitationId, InvitationRecord, ReferralSnapshot, SessionToken};

const SENT_MESSAGE: &str = "Invitation sent";
const RESENT_MESSAGE: &str = "Invitation resent";
const DELETED_MESSAGE: &str = "Invitation deleted";

/// Where the initial load is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Nothing attempted yet
    #[default]
    Idle,
    Loading,
    Ready,
    /// Initial load failed; see `inline_error`
    Failed,
}

/// Phone-entry bottom sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteSheet {
    pub open: bool,
    pub phone: PhoneField,
    pub submitting: bool,
}

/// Everything a view needs to render the screen
#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    pub phase: LoadPhase,
    pub snapshot: ReferralSnapshot,
    /// Sent invitations whose countdown reached zero locally
    pub locally_expired: HashSet<InvitationId>,
    /// Fatal error shown in place of the list
    pub inline_error: Option<String>,
    pub sheet: InviteSheet,
    applied_seq: u64,
}

impl ScreenState {
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// The five rows of the invite card at `now`.
    pub fn slots(&self, now: DateTime<Utc>) -> Vec<DisplaySlot> {
        normalize(&self.snapshot.invitations, now, &self.locally_expired)
    }
}

/// Orchestrates login, loading and user actions for the referral screen.
pub struct ScreenController {
    api: Arc<dyn ReferralApi>,
    toasts: ToastRelay,
    state: watch::Sender<ScreenState>,
    session: Mutex<Option<SessionToken>>,
    issued_seq: AtomicU64,
}

impl std::fmt::Debug for ScreenController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenController")
            .field("phase", &self.state.borrow().phase)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl ScreenController {
    pub fn new(api: Arc<dyn ReferralApi>, toasts: ToastRelay) -> Self {
        let (state, _rx) = watch::channel(ScreenState::default());
        Self {
            api,
            toasts,
            state,
            session: Mutex::new(None),
            issued_seq: AtomicU64::new(0),
        }
    }

    pub fn toasts(&self) -> &ToastRelay {
        &self.toasts
    }

    /// Snapshot of the current screen state.
    pub fn state(&self) -> ScreenState {
        self.state.borrow().clone()
    }

    /// Receiver notified whenever screen state changes.
    pub fn subscribe(&self) -> watch::Receiver<ScreenState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.lock().is_some()
    }

    // ------------------------------------------------------------------
    // Initialize / load
    // ------------------------------------------------------------------

    /// Validate the entry parameters and run the initial load.
    ///
    /// Missing parameters fail without touching the network.
    pub async fn initialize(
        &self,
        toki_id: Option<String>,
        msisdn: Option<String>,
    ) -> ReferralResult<()> {
        match EntryParams::new(toki_id, msisdn) {
            Ok(params) => self.authenticate_and_load(&params).await,
            Err(err) => {
                tracing::warn!(error = %err, "cannot start referral screen");
                self.fail_initial_load(&err);
                Err(err)
            }
        }
    }

    /// Same as [`initialize`](Self::initialize) for a page query string.
    pub async fn initialize_from_query(&self, query: &str) -> ReferralResult<()> {
        match EntryParams::from_query(query) {
            Ok(params) => self.authenticate_and_load(&params).await,
            Err(err) => {
                tracing::warn!(error = %err, "cannot start referral screen");
                self.fail_initial_load(&err);
                Err(err)
            }
        }
    }

    /// Log in, then fetch invitations with the new credential.
    ///
    /// Any failure leaves the list empty with an inline error.
    pub async fn authenticate_and_load(&self, params: &EntryParams) -> ReferralResult<()> {
        self.state.send_modify(|state| {
            state.phase = LoadPhase::Loading;
            state.inline_error = None;
            state.snapshot = ReferralSnapshot::default();
            state.locally_expired.clear();
        });

        let token = match self.api.login(params).await {
            Ok(token) => token,
            Err(err) => {
                let err = ReferralError::Authentication(err.user_message());
                tracing::error!(error = %err, "login failed");
                self.fail_initial_load(&err);
                return Err(err);
            }
        };
        tracing::info!("logged in");
        *self.session.lock() = Some(token.clone());

        let seq = self.next_seq();
        match self.api.get_info(&token).await {
            Ok(snapshot) => {
                self.apply_snapshot(seq, snapshot);
                Ok(())
            }
            Err(err) => {
                let err = ReferralError::Fetch(err.user_message());
                tracing::error!(error = %err, "initial load failed");
                self.fail_initial_load(&err);
                Err(err)
            }
        }
    }

    /// Re-fetch with the held credential.
    ///
    /// Failure raises an error toast and keeps what is on screen.
    pub async fn refresh(&self) -> ReferralResult<()> {
        let token = self.token()?;
        let seq = self.next_seq();
        match self.api.get_info(&token).await {
            Ok(snapshot) => {
                self.apply_snapshot(seq, snapshot);
                Ok(())
            }
            Err(err) => {
                let err = ReferralError::Fetch(err.user_message());
                tracing::warn!(error = %err, "refresh failed");
                self.toasts.error(err.user_message());
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Invite sheet
    // ------------------------------------------------------------------

    pub fn open_sheet(&self) {
        self.state.send_modify(|state| state.sheet.open = true);
    }

    /// Close without clearing the typed number.
    pub fn close_sheet(&self) {
        self.state.send_modify(|state| state.sheet.open = false);
    }

    /// Update the phone field; non-digits are dropped as typed.
    pub fn set_phone(&self, raw: &str) {
        self.state.send_modify(|state| state.sheet.phone.set(raw));
    }

    pub fn can_submit(&self) -> bool {
        let state = self.state.borrow();
        state.sheet.phone.can_submit() && !state.sheet.submitting
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Invite the number in the sheet.
    ///
    /// An empty field is rejected before any request, as is a second submit
    /// while one is in flight. On success the sheet closes and clears; on
    /// failure it stays open with the number intact.
    pub async fn send_invitation(&self) -> ReferralResult<Ack> {
        let phone = self.state.borrow().sheet.phone.value().to_string();
        if phone.is_empty() {
            return Err(ReferralError::EmptyPhoneNumber);
        }
        let token = self.token()?;

        // check and claim in one step so two taps cannot both pass
        let claimed = self.state.send_if_modified(|state| {
            if state.sheet.submitting {
                return false;
            }
            state.sheet.submitting = true;
            true
        });
        if !claimed {
            tracing::debug!("send already in flight");
            return Err(ReferralError::SendInProgress);
        }
        let result = self.api.send_invitation(&token, &phone).await;

        match result {
            Ok(ack) => {
                tracing::info!("invitation sent");
                self.state.send_modify(|state| {
                    state.sheet.submitting = false;
                    state.sheet.open = false;
                    state.sheet.phone.clear();
                });
                self.toasts.success(success_text(&ack, SENT_MESSAGE));
                // refresh reports its own failure
                let _ = self.refresh().await;
                Ok(ack)
            }
            Err(err) => {
                let err = ReferralError::action(ActionKind::Send, err);
                tracing::warn!(error = %err, "send failed");
                self.state.send_modify(|state| state.sheet.submitting = false);
                self.toasts.error(err.user_message());
                Err(err)
            }
        }
    }

    /// Resend an invitation currently on screen.
    pub async fn resend_invitation(&self, id: &InvitationId) -> ReferralResult<Ack> {
        let record = self.require_record(id)?;
        let token = self.token()?;
        // the record's id carries the wire form the backend expects back
        let result = self
            .api
            .resend_invitation(&token, &record.id, record.resend_target())
            .await;
        self.finish_action(ActionKind::Resend, id, result, RESENT_MESSAGE)
            .await
    }

    /// Delete an invitation currently on screen.
    pub async fn delete_invitation(&self, id: &InvitationId) -> ReferralResult<Ack> {
        let record = self.require_record(id)?;
        let token = self.token()?;
        let result = self.api.delete_invitation(&token, &record.id).await;
        self.finish_action(ActionKind::Delete, id, result, DELETED_MESSAGE)
            .await
    }

    /// Flag a Sent invitation as expired for display after its countdown hit
    /// zero. The next successful refresh replaces this.
    ///
    /// Returns false if the record is unknown or not Sent.
    pub fn mark_expired(&self, id: &InvitationId) -> bool {
        self.state.send_if_modified(|state| {
            let is_sent = state.snapshot.find(id).is_some_and(InvitationRecord::is_sent);
            is_sent && state.locally_expired.insert(id.clone())
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn token(&self) -> ReferralResult<SessionToken> {
        self.session
            .lock()
            .clone()
            .ok_or(ReferralError::NotAuthenticated)
    }

    fn next_seq(&self) -> u64 {
        self.issued_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn require_record(&self, id: &InvitationId) -> ReferralResult<InvitationRecord> {
        match self.state.borrow().snapshot.find(id) {
            Some(record) => Ok(record.clone()),
            None => {
                let err = ReferralError::InvitationNotFound(id.to_string());
                self.toasts.error(err.user_message());
                Err(err)
            }
        }
    }

    async fn finish_action(
        &self,
        action: ActionKind,
        id: &InvitationId,
        result: Result<Ack, crate::api::ApiError>,
        fallback: &str,
    ) -> ReferralResult<Ack> {
        match result {
            Ok(ack) => {
                tracing::info!(%id, ?action, "invitation action succeeded");
                // refresh reports its own failure
                let _ = self.refresh().await;
                self.toasts.success(success_text(&ack, fallback));
                Ok(ack)
            }
            Err(err) => {
                let err = ReferralError::action(action, err);
                tracing::warn!(%id, error = %err, "invitation action failed");
                self.toasts.error(err.user_message());
                Err(err)
            }
        }
    }

    /// Replace list and entitlement unless a newer response already landed.
    fn apply_snapshot(&self, seq: u64, snapshot: ReferralSnapshot) {
        let applied = self.state.send_if_modified(|state| {
            if seq <= state.applied_seq {
                return false;
            }
            state.applied_seq = seq;
            state.snapshot = snapshot;
            state.locally_expired.clear();
            state.phase = LoadPhase::Ready;
            state.inline_error = None;
            true
        });
        if applied {
            tracing::debug!(seq, "applied referral snapshot");
        } else {
            tracing::debug!(seq, "discarded stale referral snapshot");
        }
    }

    fn fail_initial_load(&self, err: &ReferralError) {
        self.state.send_modify(|state| {
            state.phase = LoadPhase::Failed;
            state.inline_error = Some(err.user_message());
            state.snapshot = ReferralSnapshot::default();
        });
    }
}

fn success_text(ack: &Ack, fallback: &str) -> String {
    ack.message.clone().unwrap_or_else(|| fallback.to_string())
}
