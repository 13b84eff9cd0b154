use chrono::NaiveDate;

use crate::ledger::{Ledger, LedgerError, Snapshot};
use crate::models::{Transaction, TransactionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
    Insights,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Budgets,
            Self::Insights,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
            Self::Insights => write!(f, "Insights"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction {
        id: TransactionId,
        description: String,
    },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// Blocking message (e.g. a budget rejection); any key dismisses it.
    pub(crate) alert: Option<String>,
    /// Last failed command, for callers that run commands unattended.
    pub(crate) last_failure: Option<String>,
    /// "Now" for the This Month card and month-over-month insights.
    pub(crate) reference_date: NaiveDate,

    pub(crate) ledger: Ledger,

    // Transactions (index into recent-first order)
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Budgets (index into configured categories)
    pub(crate) budget_index: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(ledger: Ledger, reference_date: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            alert: None,
            last_failure: None,
            reference_date,

            ledger,

            transaction_index: 0,
            transaction_scroll: 0,

            budget_index: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        self.ledger.snapshot()
    }

    /// The transaction under the cursor on the Transactions screen.
    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.ledger
            .recent_transactions()
            .get(self.transaction_index)
            .copied()
    }

    /// Move the cursor onto the transaction with `id`, if it exists.
    pub(crate) fn select_transaction(&mut self, id: TransactionId) -> bool {
        let position = self
            .ledger
            .recent_transactions()
            .iter()
            .position(|t| t.id == id);
        match position {
            Some(index) => {
                self.transaction_index = index;
                if index < self.transaction_scroll
                    || index >= self.transaction_scroll + self.visible_rows.max(1)
                {
                    self.transaction_scroll = index;
                }
                true
            }
            None => false,
        }
    }

    /// Keep cursors inside their lists after the ledger shrank.
    pub(crate) fn clamp_selection(&mut self) {
        let len = self.ledger.len();
        if self.transaction_index >= len {
            self.transaction_index = len.saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        let categories = self.ledger.categories().len();
        if self.budget_index >= categories {
            self.budget_index = categories.saturating_sub(1);
        }
    }

    /// Run the pending confirmed action.
    pub(crate) fn confirm_pending(&mut self) {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteTransaction { id, description } => {
                    if self.ledger.delete_transaction(id) {
                        self.set_status(format!("Deleted: {description}"));
                    } else {
                        self.set_status(format!("Already gone: {description}"));
                    }
                    self.clamp_selection();
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Report a rejected command in the status bar.
    pub(crate) fn fail(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        self.last_failure = Some(msg.clone());
        self.status_message = msg;
    }

    /// Surface a ledger rejection. Budget rejections need acknowledgment, so
    /// they open the alert overlay instead of the status bar.
    pub(crate) fn report(&mut self, err: &LedgerError) {
        match err {
            LedgerError::BudgetExceeded { category, .. } => {
                let msg = format!(
                    "Insufficient budget for {category}! Please add funds to your budget first.\n\n{err}"
                );
                self.last_failure = Some(err.to_string());
                self.alert = Some(msg);
            }
            _ => self.fail(err.to_string()),
        }
    }
}
