//! Global CSS styles for the referral screen.
//!
//! Light mobile layout in Toki brand colors: a red banner on top and a white
//! card pinned to the bottom.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  /* BRAND */
  --toki-red: #e4002b;
  --toki-red-dark: #b80023;
  --toki-red-soft: rgba(228, 0, 43, 0.08);

  /* TEXT */
  --ink: #1d1d1f;
  --slate: #8e8e93;
  --text-on-brand: #ffffff;

  /* SURFACES */
  --surface: #ffffff;
  --surface-muted: #f5f5f7;
  --divider: #e5e5ea;

  /* SEMANTIC */
  --mint: #00b67a;
  --mint-soft: rgba(0, 182, 122, 0.12);
  --danger: #e4002b;

  /* Typography */
  --font-sans: -apple-system, 'SF Pro Text', 'Roboto', 'Segoe UI', sans-serif;
  --text-xs: 0.75rem;
  --text-sm: 0.875rem;
  --text-base: 1rem;
  --text-lg: 1.25rem;
  --text-xl: 1.75rem;

  /* Shape */
  --radius-card: 20px;
  --radius-row: 14px;

  /* Transitions */
  --transition-fast: 150ms ease;
  --transition-sheet: 250ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html, body {
  height: 100%;
  background: var(--toki-red);
  color: var(--ink);
  font-family: var(--font-sans);
  font-size: 16px;
  -webkit-font-smoothing: antialiased;
  overflow: hidden;
}

button {
  font-family: inherit;
}

/* === Screen Layout === */
.screen {
  position: relative;
  display: flex;
  flex-direction: column;
  height: 100vh;
  overflow: hidden;
}

.content {
  flex: 1;
  padding: 1.5rem 1.25rem 1rem;
  overflow-y: auto;
}

/* === Banner === */
.banner-card {
  display: flex;
  flex-direction: column;
  gap: 1rem;
  color: var(--text-on-brand);
}

.banner-subtitle {
  font-size: var(--text-sm);
  opacity: 0.85;
}

.banner-title {
  margin-top: 0.25rem;
  font-size: var(--text-xl);
  font-weight: 700;
  line-height: 1.2;
}

.banner-desc {
  margin-top: 0.5rem;
  font-size: var(--text-sm);
  line-height: 1.45;
  opacity: 0.9;
}

.entitlement {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.75rem 1rem;
  background: rgba(255, 255, 255, 0.16);
  border-radius: var(--radius-row);
}

.entitlement-count {
  font-weight: 600;
}

.entitlement .countdown {
  color: var(--text-on-brand);
  font-weight: 600;
}

/* === Bottom Card === */
.bottom-card {
  padding: 1.25rem 1.25rem 2rem;
  background: var(--surface);
  border-radius: var(--radius-card) var(--radius-card) 0 0;
  box-shadow: 0 -4px 24px rgba(0, 0, 0, 0.08);
}

.bottom-title {
  margin-bottom: 0.75rem;
  font-size: var(--text-lg);
  font-weight: 700;
}

.inner-card {
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
}

/* === Loading & Error States === */
.loading-state {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  margin-bottom: 0.75rem;
  color: var(--slate);
  font-size: var(--text-sm);
}

.spinner,
.btn-spinner {
  display: inline-block;
  width: 1rem;
  height: 1rem;
  border: 2px solid currentColor;
  border-right-color: transparent;
  border-radius: 50%;
  animation: spin 0.8s linear infinite;
}

@keyframes spin {
  to { transform: rotate(360deg); }
}

.inline-error {
  margin-bottom: 0.75rem;
  padding: 0.625rem 0.875rem;
  background: var(--toki-red-soft);
  border-radius: 10px;
  color: var(--danger);
  font-size: var(--text-sm);
}

/* === Invite Rows === */
.invite-row {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 0.75rem;
  min-height: 64px;
  padding: 0.625rem 0.875rem;
  background: var(--surface-muted);
  border-radius: var(--radius-row);
}

.invite-row.joined {
  background: var(--mint-soft);
}

.invite-row.expired .invite-number {
  color: var(--slate);
}

.left {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  min-width: 0;
}

.avatar {
  flex-shrink: 0;
  width: 40px;
  height: 40px;
  border: 2px dashed var(--divider);
  border-radius: 50%;
}

.avatar.filled {
  border: none;
  background: var(--toki-red-soft);
}

.invite-text {
  color: var(--slate);
  font-size: var(--text-base);
}

.invite-info {
  display: flex;
  flex-direction: column;
  gap: 0.125rem;
  min-width: 0;
}

.invite-number {
  font-weight: 600;
  letter-spacing: 0.02em;
}

.invite-meta {
  display: flex;
  gap: 0.5rem;
  color: var(--slate);
  font-size: var(--text-xs);
}

.operator::after {
  content: '\2022';
  margin-left: 0.5rem;
}

.invite-row.joined .status {
  color: var(--mint);
}

.add-btn {
  width: 36px;
  height: 36px;
  background: var(--toki-red);
  border: none;
  border-radius: 50%;
  color: var(--text-on-brand);
  font-size: 1.25rem;
  line-height: 1;
  cursor: pointer;
  transition: transform var(--transition-fast);
}

.add-btn:active {
  transform: scale(0.94);
}

.add-btn:disabled {
  background: var(--divider);
  cursor: default;
}

.row-actions {
  display: flex;
  align-items: center;
  gap: 0.5rem;
}

.joined-badge {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  width: 28px;
  height: 28px;
  background: var(--mint);
  border-radius: 50%;
  color: var(--text-on-brand);
  font-size: var(--text-sm);
}

/* === Countdown === */
.countdown {
  color: var(--toki-red);
  font-size: var(--text-sm);
  font-variant-numeric: tabular-nums;
  font-weight: 600;
}

.countdown.expired {
  color: var(--slate);
}

/* === Buttons === */
.btn-primary,
.btn-outline {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  gap: 0.5rem;
  padding: 0.5rem 1rem;
  border-radius: 999px;
  font-size: var(--text-sm);
  font-weight: 600;
  cursor: pointer;
  transition: opacity var(--transition-fast), transform var(--transition-fast);
}

.btn-primary {
  background: var(--toki-red);
  border: 1px solid var(--toki-red);
  color: var(--text-on-brand);
}

.btn-primary:hover:not(:disabled) {
  background: var(--toki-red-dark);
}

.btn-outline {
  background: transparent;
  border: 1px solid var(--toki-red);
  color: var(--toki-red);
}

.btn-primary:disabled,
.btn-outline:disabled {
  opacity: 0.4;
  cursor: default;
}

.busy {
  pointer-events: none;
}

.icon-btn,
.close-btn {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  width: 32px;
  height: 32px;
  background: transparent;
  border: none;
  border-radius: 50%;
  color: var(--slate);
  cursor: pointer;
}

.icon-btn:hover,
.close-btn:hover {
  background: var(--surface-muted);
}

.delete-btn:hover {
  color: var(--danger);
}

/* === Invite Sheet === */
.sheet-backdrop {
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.4);
  opacity: 0;
  pointer-events: none;
  transition: opacity var(--transition-sheet);
  z-index: 10;
}

.sheet-backdrop.visible {
  opacity: 1;
  pointer-events: auto;
}

.sheet {
  position: fixed;
  left: 0;
  right: 0;
  bottom: 0;
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
  padding: 0 1.25rem 2rem;
  background: var(--surface);
  border-radius: var(--radius-card) var(--radius-card) 0 0;
  transform: translateY(100%);
  transition: transform var(--transition-sheet);
  z-index: 11;
}

.sheet.open {
  transform: translateY(0);
}

.sheet-handle-area {
  display: flex;
  justify-content: center;
  padding: 0.75rem 0 0.5rem;
  cursor: grab;
  touch-action: none;
}

.sheet-drag-layer {
  position: fixed;
  inset: 0;
  cursor: grabbing;
  touch-action: none;
  z-index: 12;
}

.sheet-handle {
  width: 40px;
  height: 5px;
  background: var(--divider);
  border-radius: 3px;
}

.sheet-title {
  font-size: var(--text-lg);
  font-weight: 700;
}

.sheet-desc {
  color: var(--slate);
  font-size: var(--text-sm);
}

.sheet-submit {
  width: 100%;
  padding: 0.875rem 1rem;
  font-size: var(--text-base);
}

/* === Input Fields === */
.form-field {
  display: flex;
  flex-direction: column;
  gap: 0.375rem;
}

.input-field {
  width: 100%;
  padding: 0.875rem 1rem;
  background: var(--surface-muted);
  border: 1px solid transparent;
  border-radius: 12px;
  color: var(--ink);
  font-size: var(--text-base);
  transition: border-color var(--transition-fast);
}

.input-field::placeholder {
  color: var(--slate);
}

.input-field:focus {
  outline: none;
  border-color: var(--toki-red);
}

.phone-input {
  font-variant-numeric: tabular-nums;
  letter-spacing: 0.06em;
}

/* === Toasts === */
.toast-stack {
  position: fixed;
  top: 1rem;
  left: 1rem;
  right: 1rem;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  z-index: 20;
}

.toast {
  display: flex;
  align-items: center;
  gap: 0.625rem;
  padding: 0.75rem 0.875rem;
  background: var(--surface);
  border-radius: 12px;
  box-shadow: 0 6px 20px rgba(0, 0, 0, 0.15);
  animation: toast-in 200ms ease;
}

.toast-success .toast-icon {
  color: var(--mint);
}

.toast-error .toast-icon {
  color: var(--danger);
}

.toast-message {
  flex: 1;
  font-size: var(--text-sm);
}

@keyframes toast-in {
  from { opacity: 0; transform: translateY(-8px); }
  to { opacity: 1; transform: translateY(0); }
}

/* === Accessibility === */
@media (prefers-reduced-motion: reduce) {
  *, *::before, *::after {
    animation-duration: 0.01ms !important;
    transition-duration: 0.01ms !important;
  }
}
"#;
