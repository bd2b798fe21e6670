// ============================================================================
// CHART MODELS - Payloads de /api/... (campos ausentes => vacío)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Gráficos conocidos: cada uno ligado a un <canvas id="...">
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    SpendingByCategory,
    SpendingTrend,
    IncomeVsExpenses,
    AccountBalance,
    BudgetProgress,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::SpendingByCategory,
        ChartKind::SpendingTrend,
        ChartKind::IncomeVsExpenses,
        ChartKind::AccountBalance,
        ChartKind::BudgetProgress,
    ];

    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartKind::SpendingByCategory => "spendingByCategoryChart",
            ChartKind::SpendingTrend => "spendingTrendChart",
            ChartKind::IncomeVsExpenses => "incomeVsExpensesChart",
            ChartKind::AccountBalance => "accountBalanceChart",
            ChartKind::BudgetProgress => "budgetProgressChart",
        }
    }

    /// Nombre público (reload_chart desde JS)
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::SpendingByCategory => "spendingByCategory",
            ChartKind::SpendingTrend => "spendingTrend",
            ChartKind::IncomeVsExpenses => "incomeVsExpenses",
            ChartKind::AccountBalance => "accountBalance",
            ChartKind::BudgetProgress => "budgetProgress",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            ChartKind::SpendingTrend => "No spending data available for this period",
            ChartKind::SpendingByCategory => "No categorized spending for this period",
            ChartKind::IncomeVsExpenses => "No income or expenses recorded yet",
            ChartKind::AccountBalance => "No accounts to display",
            ChartKind::BudgetProgress => "No budgets defined",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendingByCategory {
    pub categories: Vec<String>,
    pub amounts: Vec<f64>,
    pub colors: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendingTrend {
    pub dates: Vec<String>,
    pub amounts: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyTotals {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeVsExpenses {
    pub data: Vec<MonthlyTotals>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountBalanceEntry {
    pub name: String,
    pub balance: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountBalances {
    pub accounts: Vec<AccountBalanceEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetEntry {
    pub category: String,
    pub budgeted: f64,
    pub spent: f64,
    pub over_threshold: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetProgress {
    pub budgets: Vec<BudgetEntry>,
}

/// Resultado de una carga ya traducido a lo que se dibuja
#[derive(Clone, Debug, PartialEq)]
pub enum ChartPayload {
    SpendingByCategory(SpendingByCategory),
    SpendingTrend(SpendingTrend),
    IncomeVsExpenses(IncomeVsExpenses),
    AccountBalance(AccountBalances),
    BudgetProgress(BudgetProgress),
}

impl ChartPayload {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartPayload::SpendingByCategory(_) => ChartKind::SpendingByCategory,
            ChartPayload::SpendingTrend(_) => ChartKind::SpendingTrend,
            ChartPayload::IncomeVsExpenses(_) => ChartKind::IncomeVsExpenses,
            ChartPayload::AccountBalance(_) => ChartKind::AccountBalance,
            ChartPayload::BudgetProgress(_) => ChartKind::BudgetProgress,
        }
    }

    /// Payload vacío => estado vacío legítimo, no error
    pub fn is_empty(&self) -> bool {
        match self {
            ChartPayload::SpendingByCategory(p) => p.categories.is_empty() || p.amounts.is_empty(),
            ChartPayload::SpendingTrend(p) => p.dates.is_empty(),
            ChartPayload::IncomeVsExpenses(p) => p.data.is_empty(),
            ChartPayload::AccountBalance(p) => p.accounts.is_empty(),
            ChartPayload::BudgetProgress(p) => p.budgets.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_degrade_to_empty() {
        let trend: SpendingTrend = serde_json::from_str("{}").unwrap();
        assert!(ChartPayload::SpendingTrend(trend).is_empty());

        let budgets: BudgetProgress =
            serde_json::from_str(r#"{"budgets":[{"category":"Food","spent":12.5}]}"#).unwrap();
        assert_eq!(budgets.budgets[0].budgeted, 0.0);
        assert!(!budgets.budgets[0].over_threshold);
        assert!(!ChartPayload::BudgetProgress(budgets).is_empty());
    }

    #[test]
    fn test_chart_names() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ChartKind::SpendingTrend.canvas_id(), "spendingTrendChart");
    }
}
