// Periodic Raffle Program - Instruction Processor
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed, set_return_data},
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction, system_program,
    sysvar::Sysvar,
};

use crate::{
    config::RaffleParams,
    error::RaffleError,
    events::RaffleEvent,
    instruction::RaffleInstruction,
    oracle::{RandomWord, RequestId},
    state::Raffle,
    utils::{self, RAFFLE_SEED},
};

/// Program state handler.
pub struct Processor;

impl Processor {
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = RaffleInstruction::unpack(instruction_data)?;

        match instruction {
            RaffleInstruction::InitializeRaffle { params } => {
                msg!("Instruction: Initialize Raffle");
                Self::process_initialize_raffle(accounts, params, program_id)
            }
            RaffleInstruction::Enter { fee } => {
                msg!("Instruction: Enter");
                Self::process_enter(accounts, fee, program_id)
            }
            RaffleInstruction::CheckUpkeep => {
                msg!("Instruction: Check Upkeep");
                Self::process_check_upkeep(accounts, program_id)
            }
            RaffleInstruction::PerformUpkeep => {
                msg!("Instruction: Perform Upkeep");
                Self::process_perform_upkeep(accounts, program_id)
            }
            RaffleInstruction::FulfillRandomness {
                request_id,
                random_word,
            } => {
                msg!("Instruction: Fulfill Randomness");
                Self::process_fulfill_randomness(accounts, request_id, random_word, program_id)
            }
            RaffleInstruction::ReopenStaleDraw => {
                msg!("Instruction: Reopen Stale Draw");
                Self::process_reopen_stale_draw(accounts, program_id)
            }
        }
    }

    fn process_initialize_raffle(
        accounts: &[AccountInfo],
        params: RaffleParams,
        program_id: &Pubkey,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let admin_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;
        let oracle_authority_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        if !admin_info.is_signer {
            msg!("Admin must sign the transaction");
            return Err(ProgramError::MissingRequiredSignature);
        }
        if !system_program::check_id(system_program_info.key) {
            return Err(ProgramError::IncorrectProgramId);
        }
        params.validate().map_err(RaffleError::log)?;

        let (expected_raffle, bump_seed) = utils::find_raffle_address(program_id, admin_info.key);
        if *raffle_info.key != expected_raffle {
            return Err(RaffleError::InvalidRaffleAccount.log());
        }
        if raffle_info.owner == program_id {
            return Err(RaffleError::RaffleAlreadyInitialized.log());
        }

        let space = Raffle::space(params.capacity);
        let rent_lamports = Rent::get()?.minimum_balance(space);
        let bump = [bump_seed];
        let raffle_seeds: &[&[u8]] = &[RAFFLE_SEED, admin_info.key.as_ref(), &bump];

        if raffle_info.lamports() == 0 {
            invoke_signed(
                &system_instruction::create_account(
                    admin_info.key,
                    raffle_info.key,
                    rent_lamports,
                    space as u64,
                    program_id,
                ),
                &[
                    admin_info.clone(),
                    raffle_info.clone(),
                    system_program_info.clone(),
                ],
                &[raffle_seeds],
            )?;
        } else {
            // create_account rejects an address that already holds lamports
            msg!("Raffle address is pre-funded, allocating in place");
            let top_up = rent_lamports.saturating_sub(raffle_info.lamports());
            if top_up > 0 {
                invoke(
                    &system_instruction::transfer(admin_info.key, raffle_info.key, top_up),
                    &[
                        admin_info.clone(),
                        raffle_info.clone(),
                        system_program_info.clone(),
                    ],
                )?;
            }
            invoke_signed(
                &system_instruction::allocate(raffle_info.key, space as u64),
                &[raffle_info.clone(), system_program_info.clone()],
                &[raffle_seeds],
            )?;
            invoke_signed(
                &system_instruction::assign(raffle_info.key, program_id),
                &[raffle_info.clone(), system_program_info.clone()],
                &[raffle_seeds],
            )?;
        }

        let clock = Clock::get()?;
        let raffle = Raffle::new(
            *admin_info.key,
            bump_seed,
            *oracle_authority_info.key,
            &params,
            clock.unix_timestamp,
        );
        raffle.save(raffle_info)?;

        RaffleEvent::RaffleInitialized {
            admin: *admin_info.key,
            entrance_fee: params.entrance_fee,
            interval: params.interval,
        }
        .emit();
        Ok(())
    }

    fn process_enter(accounts: &[AccountInfo], fee: u64, program_id: &Pubkey) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let participant_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        if !participant_info.is_signer {
            msg!("Participant must sign the transaction");
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut raffle = Raffle::load(raffle_info, program_id)?;
        let event = raffle
            .enter(*participant_info.key, fee)
            .map_err(RaffleError::log)?;

        // The pot lives on the raffle account itself
        invoke(
            &system_instruction::transfer(participant_info.key, raffle_info.key, fee),
            &[
                participant_info.clone(),
                raffle_info.clone(),
                system_program_info.clone(),
            ],
        )?;

        raffle.save(raffle_info)?;
        event.emit();
        Ok(())
    }

    fn process_check_upkeep(accounts: &[AccountInfo], program_id: &Pubkey) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let raffle_info = next_account_info(account_info_iter)?;

        let raffle = Raffle::load(raffle_info, program_id)?;
        let clock = Clock::get()?;
        let status = raffle.check_upkeep(clock.unix_timestamp);

        msg!(
            "Upkeep needed: {} (open={}, time passed={}, players={}, balance={})",
            status.upkeep_needed,
            status.is_open,
            status.time_passed,
            status.has_players,
            status.has_balance
        );
        let data = borsh::to_vec(&status).map_err(|_| ProgramError::InvalidAccountData)?;
        set_return_data(&data);
        Ok(())
    }

    fn process_perform_upkeep(accounts: &[AccountInfo], program_id: &Pubkey) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let keeper_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;

        if !keeper_info.is_signer {
            msg!("Keeper must sign the transaction");
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut raffle = Raffle::load(raffle_info, program_id)?;
        let clock = Clock::get()?;
        let event = raffle
            .start_draw(raffle_info.key, clock.unix_timestamp)
            .map_err(RaffleError::log)?;

        raffle.save(raffle_info)?;
        event.emit();
        Ok(())
    }

    fn process_fulfill_randomness(
        accounts: &[AccountInfo],
        request_id: RequestId,
        random_word: RandomWord,
        program_id: &Pubkey,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let oracle_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;
        let winner_info = next_account_info(account_info_iter)?;

        let mut raffle = Raffle::load(raffle_info, program_id)?;
        let clock = Clock::get()?;

        let event = raffle
            .on_fulfillment(
                oracle_info.key,
                oracle_info.is_signer,
                &request_id,
                &random_word,
                clock.unix_timestamp,
                |winner, amount| {
                    if winner_info.key != winner {
                        msg!("Winner account {} is not the selected participant", winner_info.key);
                        return Err(ProgramError::InvalidArgument);
                    }
                    if !winner_info.is_writable {
                        msg!("Winner account must be writable");
                        return Err(ProgramError::InvalidArgument);
                    }
                    utils::move_lamports(raffle_info, winner_info, amount)
                },
            )
            .map_err(RaffleError::log)?;

        raffle.save(raffle_info)?;
        event.emit();
        Ok(())
    }

    fn process_reopen_stale_draw(accounts: &[AccountInfo], program_id: &Pubkey) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let caller_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;

        if !caller_info.is_signer {
            msg!("Caller must sign the transaction");
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut raffle = Raffle::load(raffle_info, program_id)?;
        let clock = Clock::get()?;
        let event = raffle
            .reopen_stale_draw(clock.unix_timestamp)
            .map_err(RaffleError::log)?;

        raffle.save(raffle_info)?;
        event.emit();
        Ok(())
    }
}
