/// Jupiter v6 `route` instruction: argument layout, decoding and assembly
///
/// The argument types mirror the program's IDL. Instruction data is an 8 byte
/// anchor discriminator followed by the borsh encoded `RouteArgs`. A payload
/// using a `Swap` variant this table does not know fails to decode, which
/// usually means the IDL moved on.
use super::types::AccountMeta;
use crate::errors::{DecodeError, SwapCacheError};
use crate::logger::{self, LogTag};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use borsh::{BorshDeserialize, BorshSerialize};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use solana_sdk::instruction::{AccountMeta as SolanaAccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use std::str::FromStr;

/// Jupiter aggregator v6 program
pub const JUPITER_V6_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4");

/// Jupiter v6 event authority PDA
pub const JUPITER_EVENT_AUTHORITY: Pubkey =
    solana_sdk::pubkey!("D8cy77BBepLMngZx6ZukaTff5hCt1HrWyKk3Hnd9oitf");

/// Number of fixed leading accounts in a `route` instruction.
///
/// The swap-instructions API lists the nine `RouteAccounts` first and the hop
/// accounts after them; everything past this prefix is cached as remaining
/// accounts. If Jupiter ever reorders or extends the strict account list this
/// constant and `RouteAccounts` must change together.
pub const ROUTE_STRICT_ACCOUNTS_LEN: usize = 9;

static ROUTE_DISCRIMINATOR: Lazy<[u8; 8]> = Lazy::new(|| anchor_discriminator("route"));

/// Anchor instruction discriminator: `sha256("global:<name>")[..8]`
pub fn anchor_discriminator(instruction_name: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("global:{}", instruction_name).as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash[..8]);
    out
}

pub fn route_discriminator() -> [u8; 8] {
    *ROUTE_DISCRIMINATOR
}

// =============================================================================
// IDL TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum Side {
    Bid,
    Ask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum AccountsType {
    TransferHookA,
    TransferHookB,
    TransferHookReward,
    TransferHookInput,
    TransferHookIntermediate,
    TransferHookOutput,
    SupplementalTickArrays,
    SupplementalTickArraysOne,
    SupplementalTickArraysTwo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingAccountsSlice {
    pub accounts_type: AccountsType,
    pub length: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct RemainingAccountsInfo {
    pub slices: Vec<RemainingAccountsSlice>,
}

/// Venue-specific swap selector; variant order is the on-chain tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum Swap {
    Saber,
    SaberAddDecimalsDeposit,
    SaberAddDecimalsWithdraw,
    TokenSwap,
    Sencha,
    Step,
    Cropper,
    Raydium,
    Crema { a_to_b: bool },
    Lifinity,
    Mercurial,
    Cykura,
    Serum { side: Side },
    MarinadeDeposit,
    MarinadeUnstake,
    Aldrin { side: Side },
    AldrinV2 { side: Side },
    Whirlpool { a_to_b: bool },
    Invariant { x_to_y: bool },
    Meteora,
    GooseFX,
    DeltaFi { stable: bool },
    Balansol,
    MarcoPolo { x_to_y: bool },
    Dradex { side: Side },
    LifinityV2,
    RaydiumClmm,
    Openbook { side: Side },
    Phoenix { side: Side },
    Symmetry { from_token_id: u64, to_token_id: u64 },
    TokenSwapV2,
    HeliumTreasuryManagementRedeemV0,
    StakeDexStakeWrappedSol,
    StakeDexSwapViaStake { bridge_stake_seed: u32 },
    GooseFXV2,
    Perps,
    PerpsAddLiquidity,
    PerpsRemoveLiquidity,
    MeteoraDlmm,
    OpenBookV2 { side: Side },
    RaydiumClmmV2,
    StakeDexPrefundWithdrawStakeAndDepositStake { bridge_stake_seed: u32 },
    Clone { pool_index: u8, quantity_is_input: bool, quantity_is_collateral: bool },
    SanctumS {
        src_lst_value_calc_accs: u8,
        dst_lst_value_calc_accs: u8,
        src_lst_index: u32,
        dst_lst_index: u32,
    },
    SanctumSAddLiquidity { lst_value_calc_accs: u8, lst_index: u32 },
    SanctumSRemoveLiquidity { lst_value_calc_accs: u8, lst_index: u32 },
    RaydiumCP,
    WhirlpoolSwapV2 {
        a_to_b: bool,
        remaining_accounts_info: Option<RemainingAccountsInfo>,
    },
    OneIntro,
    PumpdotfunWrappedBuy,
    PumpdotfunWrappedSell,
    PerpsV2,
    PerpsV2AddLiquidity,
    PerpsV2RemoveLiquidity,
    MoonshotWrappedBuy,
    MoonshotWrappedSell,
    StabbleStableSwap,
    StabbleWeightedSwap,
    Obric { x_to_y: bool },
    FoxBuyFromEstimatedCost,
    FoxClaimPartial { is_y: bool },
    SolFi { is_quote_to_base: bool },
    SolayerDelegateNoInit,
    SolayerUndelegateNoInit,
    TokenMill { side: Side },
    DaosFunBuy,
    DaosFunSell,
    ZeroFi,
    StakeDexWithdrawWrappedSol,
    VirtualsBuy,
    VirtualsSell,
    Perena { in_index: u8, out_index: u8 },
    PumpdotfunAmmBuy,
    PumpdotfunAmmSell,
    Gamma,
}

/// One hop of a decoded route plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanStep {
    pub swap: Swap,
    pub percent: u8,
    pub input_index: u8,
    pub output_index: u8,
}

/// Arguments of the `route` instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteArgs {
    pub route_plan: Vec<RoutePlanStep>,
    pub in_amount: u64,
    pub quoted_out_amount: u64,
    pub slippage_bps: u16,
    pub platform_fee_bps: u8,
}

// =============================================================================
// DECODING
// =============================================================================

/// Decode `swapInstruction.data` from the swap-instructions API
pub fn decode_swap_instruction_data(data: &str) -> Result<RouteArgs, DecodeError> {
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;

    if bytes.len() < 8 {
        return Err(DecodeError::Truncated { len: bytes.len() });
    }

    let (head, payload) = bytes.split_at(8);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(head);
    if discriminator != route_discriminator() {
        return Err(DecodeError::UnknownInstruction { discriminator });
    }

    let args = RouteArgs::try_from_slice(payload).map_err(|e| DecodeError::Layout {
        data: data.to_string(),
        reason: e.to_string(),
    })?;

    logger::verbose(
        LogTag::Decoder,
        &format!(
            "Decoded route: {} hops, in={}, quoted_out={}",
            args.route_plan.len(),
            args.in_amount,
            args.quoted_out_amount
        ),
    );

    Ok(args)
}

/// Encode `route` instruction data (discriminator + borsh args)
pub fn encode_route_instruction_data(args: &RouteArgs) -> Result<Vec<u8>, DecodeError> {
    let mut data = route_discriminator().to_vec();
    let encoded = borsh::to_vec(args).map_err(|e| DecodeError::Encoding(e.to_string()))?;
    data.extend_from_slice(&encoded);
    Ok(data)
}

// =============================================================================
// INSTRUCTION ASSEMBLY
// =============================================================================

/// The nine strict accounts of `route`, in instruction order.
///
/// Optional accounts (`destination_token_account`, `platform_fee_account`)
/// take `JUPITER_V6_PROGRAM_ID` when unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAccounts {
    pub token_program: Pubkey,
    pub user_transfer_authority: Pubkey,
    pub user_source_token_account: Pubkey,
    pub user_destination_token_account: Pubkey,
    pub destination_token_account: Pubkey,
    pub destination_mint: Pubkey,
    pub platform_fee_account: Pubkey,
    pub event_authority: Pubkey,
    pub program: Pubkey,
}

impl RouteAccounts {
    pub fn to_account_metas(&self) -> Vec<SolanaAccountMeta> {
        let optional_mut = |key: Pubkey| {
            if key == JUPITER_V6_PROGRAM_ID {
                SolanaAccountMeta::new_readonly(key, false)
            } else {
                SolanaAccountMeta::new(key, false)
            }
        };

        vec![
            SolanaAccountMeta::new_readonly(self.token_program, false),
            SolanaAccountMeta::new_readonly(self.user_transfer_authority, true),
            SolanaAccountMeta::new(self.user_source_token_account, false),
            SolanaAccountMeta::new(self.user_destination_token_account, false),
            optional_mut(self.destination_token_account),
            SolanaAccountMeta::new_readonly(self.destination_mint, false),
            optional_mut(self.platform_fee_account),
            SolanaAccountMeta::new_readonly(self.event_authority, false),
            SolanaAccountMeta::new_readonly(self.program, false),
        ]
    }
}

impl AccountMeta {
    /// A malformed address is a bad cached record, not layout drift
    pub fn to_solana(&self) -> Result<SolanaAccountMeta, SwapCacheError> {
        let pubkey = Pubkey::from_str(&self.pubkey)
            .map_err(|e| SwapCacheError::invalid_pubkey(self.pubkey.clone(), e))?;
        Ok(SolanaAccountMeta {
            pubkey,
            is_signer: self.is_signer,
            is_writable: self.is_writable,
        })
    }
}

/// A `route` instruction ready to be placed in a transaction and signed
pub struct PreparedInstruction<'a> {
    pub instruction: Instruction,
    pub signers: Vec<&'a Keypair>,
}

impl std::fmt::Debug for PreparedInstruction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedInstruction")
            .field("instruction", &self.instruction)
            .field("signers", &self.signers.len())
            .finish()
    }
}

/// Build a Jupiter v6 `route` instruction from cached building blocks.
///
/// Slippage and platform fee default to 0 when not given.
#[allow(clippy::too_many_arguments)]
pub fn create_swap_instruction<'a>(
    accounts: &RouteAccounts,
    remaining_accounts: &[AccountMeta],
    route_plan: &[RoutePlanStep],
    in_amount: u64,
    quoted_out_amount: u64,
    signer: &'a Keypair,
    slippage_bps: Option<u16>,
    platform_fee_bps: Option<u8>,
) -> Result<PreparedInstruction<'a>, SwapCacheError> {
    let args = RouteArgs {
        route_plan: route_plan.to_vec(),
        in_amount,
        quoted_out_amount,
        slippage_bps: slippage_bps.unwrap_or(0),
        platform_fee_bps: platform_fee_bps.unwrap_or(0),
    };

    let mut metas = accounts.to_account_metas();
    for meta in remaining_accounts {
        metas.push(meta.to_solana()?);
    }

    let data = encode_route_instruction_data(&args)?;

    Ok(PreparedInstruction {
        instruction: Instruction {
            program_id: JUPITER_V6_PROGRAM_ID,
            accounts: metas,
            data,
        },
        signers: vec![signer],
    })
}
