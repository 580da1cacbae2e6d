//! Expense business logic - Owner-side operating expenses.

use crate::{
    core::billing::{month_bounds, round_to_paise},
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::BTreeMap;

/// Records an operating expense.
pub async fn create_expense(
    db: &DatabaseConnection,
    description: String,
    category: String,
    amount: f64,
    expense_date: NaiveDate,
) -> Result<expense::Model> {
    if description.trim().is_empty() {
        return Err(Error::Validation {
            message: "Expense description cannot be empty".to_string(),
        });
    }
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }

    let category = if category.trim().is_empty() {
        "misc".to_string()
    } else {
        category.trim().to_string()
    };

    let model = expense::ActiveModel {
        description: Set(description.trim().to_string()),
        category: Set(category),
        amount: Set(round_to_paise(amount)),
        expense_date: Set(expense_date),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Retrieves all expenses, newest first.
pub async fn get_all_expenses(db: &DatabaseConnection) -> Result<Vec<expense::Model>> {
    Expense::find()
        .order_by_desc(expense::Column::ExpenseDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the expenses dated in the given month.
pub async fn get_expenses_in_month(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
) -> Result<Vec<expense::Model>> {
    let (first, last) = month_bounds(year, month)?;
    Expense::find()
        .filter(expense::Column::ExpenseDate.between(first, last))
        .order_by_asc(expense::Column::ExpenseDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums the expenses of a month.
pub async fn monthly_total(db: &DatabaseConnection, year: i32, month: u32) -> Result<f64> {
    let expenses = get_expenses_in_month(db, year, month).await?;
    Ok(round_to_paise(expenses.iter().map(|e| e.amount).sum()))
}

/// Sums a month's expenses per category, largest first.
pub async fn totals_by_category(
    db: &DatabaseConnection,
    year: i32,
    month: u32,
) -> Result<Vec<(String, f64)>> {
    let expenses = get_expenses_in_month(db, year, month).await?;

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for e in expenses {
        *totals.entry(e.category).or_insert(0.0) += e.amount;
    }

    let mut result: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(category, total)| (category, round_to_paise(total)))
        .collect();
    result.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(result)
}

/// Deletes an expense.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let expense = Expense::find_by_id(expense_id)
        .one(db)
        .await?
        .ok_or(Error::RecordNotFound {
            entity: "expense",
            id: expense_id,
        })?;

    Expense::delete_by_id(expense.id).exec(db).await?;
    Ok(())
}
