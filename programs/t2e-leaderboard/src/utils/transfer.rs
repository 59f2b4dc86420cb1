use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::{transfer_checked, TransferChecked},
    token_interface::Mint,
};

use crate::states::Leaderboard;

/// Token movements in and out of the leaderboard vaults.
pub(crate) struct TransferUtils<'a, 'info> {
    leaderboard: &'a Account<'info, Leaderboard>,
    token_program: AccountInfo<'info>,
    mint: &'a InterfaceAccount<'info, Mint>,
}

impl<'a, 'info> TransferUtils<'a, 'info> {
    pub(crate) fn new(
        token_program: AccountInfo<'info>,
        leaderboard: &'a Account<'info, Leaderboard>,
        mint: &'a InterfaceAccount<'info, Mint>,
    ) -> Self {
        Self {
            leaderboard,
            token_program,
            mint,
        }
    }

    /// Transfer from a vault owned by the leaderboard, signed by the leaderboard PDA.
    pub(crate) fn transfer_out(
        &self,
        from: AccountInfo<'info>,
        to: AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        let signer = self.leaderboard.signer();
        transfer_checked(
            self.transfer_ctx(from, to, self.leaderboard.to_account_info())
                .with_signer(&[&signer.as_seeds()]),
            amount,
            self.mint.decimals,
        )
    }

    /// Transfer into a vault, signed by the owner of `from`.
    pub(crate) fn transfer_in(
        &self,
        from: AccountInfo<'info>,
        authority: AccountInfo<'info>,
        to: AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        transfer_checked(
            self.transfer_ctx(from, to, authority),
            amount,
            self.mint.decimals,
        )
    }

    fn transfer_ctx(
        &self,
        from: AccountInfo<'info>,
        to: AccountInfo<'info>,
        authority: AccountInfo<'info>,
    ) -> CpiContext<'_, '_, '_, 'info, TransferChecked<'info>> {
        CpiContext::new(
            self.token_program.clone(),
            TransferChecked {
                from,
                mint: self.mint.to_account_info(),
                to,
                authority,
            },
        )
    }
}
