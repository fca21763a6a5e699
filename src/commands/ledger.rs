use uuid::Uuid;

use crate::{
    domain::Account,
    ports::{
        authority::AuthorityPort,
        database::{DatabasePort, UnitOfWork},
    },
};

use super::{rejected, service, DomainLogic, Error};

#[derive(Debug)]
pub struct OpenAccountRequest {
    pub name: String,
}

#[derive(Debug)]
pub struct DepositRequest {
    pub account_id: Uuid,
    pub amount: u64,
}

/// Take funds out of the marketplace
#[derive(Debug)]
pub struct WithdrawRequest {
    pub account_id: Uuid,
    pub amount: u64,
}

/// Manually grant loyalty points, e.g. for support
#[derive(Debug)]
pub struct AwardPointsRequest {
    pub caller: Uuid,
    pub account_id: Uuid,
    pub points: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BalanceResponse {
    pub account_id: Uuid,
    /// Previous spendable balance
    pub old_balance: u64,
    /// New spendable balance
    pub new_balance: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PointsResponse {
    pub account_id: Uuid,
    /// Previous number of loyalty points
    pub old_loyalty_points: u64,
    /// New number of loyalty points
    pub new_loyalty_points: u64,
}

impl<D, A> DomainLogic<D, A>
where
    D: DatabasePort,
    A: AuthorityPort,
{
    #[tracing::instrument(skip(self))]
    pub async fn open_account(&self, req: OpenAccountRequest) -> Result<Account, Error> {
        let account = Account::new(Uuid::new_v4(), req.name);
        self.database
            .commit(UnitOfWork::new().put_account(account.clone()))
            .await?;

        tracing::info!(account_id = %account.account_id, "account opened");
        Ok(account)
    }

    #[tracing::instrument(skip(self))]
    pub async fn deposit(&self, req: DepositRequest) -> Result<BalanceResponse, Error> {
        let mut account = self.database.get_account(req.account_id).await?;
        let old_balance = account.balance();

        account.deposit(req.amount);
        let new_balance = account.balance();
        self.database
            .commit(UnitOfWork::new().put_account(account))
            .await?;

        tracing::info!(amount = req.amount, new_balance, "deposited");
        Ok(BalanceResponse {
            account_id: req.account_id,
            old_balance,
            new_balance,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn withdraw(&self, req: WithdrawRequest) -> Result<BalanceResponse, Error> {
        let mut account = self.database.get_account(req.account_id).await?;
        let old_balance = account.balance();

        // The funds leave the marketplace here
        let funds = account.withdraw(req.amount).map_err(rejected)?;
        let new_balance = account.balance();
        self.database
            .commit(UnitOfWork::new().put_account(account))
            .await?;

        tracing::info!(amount = funds.value(), new_balance, "withdrawn");
        Ok(BalanceResponse {
            account_id: req.account_id,
            old_balance,
            new_balance,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn award_points(&self, req: AwardPointsRequest) -> Result<PointsResponse, Error> {
        self.ensure_admin(req.caller).await?;
        let mut account = self.database.get_account(req.account_id).await?;
        let old_loyalty_points = account.loyalty_points();

        account.award_points(req.points);
        let new_loyalty_points = account.loyalty_points();
        self.database
            .commit(UnitOfWork::new().put_account(account))
            .await?;

        tracing::info!(points = req.points, new_loyalty_points, "points awarded");
        Ok(PointsResponse {
            account_id: req.account_id,
            old_loyalty_points,
            new_loyalty_points,
        })
    }
}

service!(OpenAccountRequest => Account, open_account);
service!(DepositRequest => BalanceResponse, deposit);
service!(WithdrawRequest => BalanceResponse, withdraw);
service!(AwardPointsRequest => PointsResponse, award_points);
